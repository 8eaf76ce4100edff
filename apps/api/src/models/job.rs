use serde::{Deserialize, Serialize};

/// One row of the job corpus after column normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    /// Lowercase, alphanumeric-and-space only, whitespace collapsed.
    pub cleaned_description: String,
    pub application_link: Option<String>,
}

impl JobPosting {
    pub fn new(job_title: impl Into<String>, cleaned_description: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            cleaned_description: cleaned_description.into(),
            application_link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.application_link = Some(link.into());
        self
    }

    /// The link, only when it carries something other than whitespace.
    pub fn usable_link(&self) -> Option<&str> {
        self.application_link
            .as_deref()
            .filter(|l| !l.trim().is_empty())
    }
}

/// A ranked job, ordered by descending `similarity_score` in every result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_title: String,
    pub application_link: Option<String>,
    /// Cosine similarity plus any title boost; can exceed 1.0.
    pub similarity_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_link_is_not_usable() {
        let job = JobPosting::new("Engineer", "rust").with_link("   ");
        assert_eq!(job.usable_link(), None);
    }

    #[test]
    fn test_present_link_is_usable() {
        let job = JobPosting::new("Engineer", "rust").with_link("https://jobs.example.com/1");
        assert_eq!(job.usable_link(), Some("https://jobs.example.com/1"));
        assert_eq!(JobPosting::new("Engineer", "rust").usable_link(), None);
    }
}
