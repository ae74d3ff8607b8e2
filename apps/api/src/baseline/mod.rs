// Baseline resume: the single piece of state shared across requests.
// Read clones it out, replace swaps it wholesale. No partial updates.

pub mod handlers;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::errors::PipelineError;
use crate::models::resume::ParsedResume;
use crate::parsing::parse_resume;

/// Built-in sample loaded at startup.
pub const SAMPLE_RESUME: &str = "JANE DOE
jane.doe@example.com | (555) 010-2030 | linkedin.com/in/janedoe

PROFESSIONAL SUMMARY
Software engineer focused on backend services and developer tooling. Experienced in building reliable APIs and data pipelines.

SKILLS
Python, JavaScript, React, Node.js, SQL, Docker, Git

EXPERIENCE
Northwind Labs, Senior Software Engineer, Mar 2021 - Present
• Designed REST APIs serving two million requests per day
• Led migration of batch jobs to event-driven workers
• Mentored four engineers through onboarding

Contoso Analytics, Software Engineer, Jun 2018 - Feb 2021
• Built ETL pipelines feeding the reporting warehouse
• Cut dashboard load time by 40% with query caching

PROJECTS
Trailhead, Creator, 2022
• Open-source CLI for scaffolding microservices
• Generates Dockerfiles and CI workflows

EDUCATION
State University, Anytown
BS Computer Science
2014 - 2018

CERTIFICATIONS
Cloud Practitioner
";

/// Shared, replaceable baseline resume. Cloning the store shares the same slot.
#[derive(Clone)]
pub struct BaselineStore {
    inner: Arc<RwLock<ParsedResume>>,
}

impl BaselineStore {
    pub fn new(resume: ParsedResume) -> Self {
        BaselineStore {
            inner: Arc::new(RwLock::new(resume)),
        }
    }

    /// Store seeded by parsing `SAMPLE_RESUME`.
    pub fn seeded() -> Result<Self, PipelineError> {
        let resume = parse_resume(SAMPLE_RESUME)?;
        info!(
            "Baseline resume seeded: {} experience, {} projects, {} skills",
            resume.experience.len(),
            resume.projects.len(),
            resume.skills.len()
        );
        Ok(Self::new(resume))
    }

    pub async fn get(&self) -> ParsedResume {
        self.inner.read().await.clone()
    }

    /// Replaces the baseline and returns the stored copy.
    pub async fn replace(&self, resume: ParsedResume) -> ParsedResume {
        let mut slot = self.inner.write().await;
        *slot = resume;
        slot.clone()
    }
}
