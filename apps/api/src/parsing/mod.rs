//! Resume parsing: contact fields, section segmentation, skill extraction.
//!
//! Contact extraction and segmentation are independent passes over the same line
//! stream; the skill extractor consumes the segmented buffers plus the full text.

pub mod fields;
pub mod handlers;
pub mod sections;
pub mod skills;

use tracing::debug;

use crate::models::resume::{ParsedResume, RawDocument};
use crate::parsing::fields::extract_contact_fields;
use crate::parsing::sections::{segment, SectionClassifier};
use crate::parsing::skills::{extract_skills, SkillMatcher};

/// Runs the whole extraction pipeline over one document.
pub fn parse_resume(
    doc: &RawDocument,
    classifier: &SectionClassifier,
    matcher: &SkillMatcher,
) -> ParsedResume {
    let contact = extract_contact_fields(doc);
    let sections = segment(doc, classifier);
    let extraction = extract_skills(matcher, &doc.full_text(), &sections);

    debug!(
        education = sections.education.len(),
        work_experience = sections.work_experience.len(),
        projects = sections.projects_certifications.len(),
        skills_lines = sections.skills.len(),
        discarded = sections.discarded,
        matched_skills = extraction.matched_skills.len(),
        "Resume segmented"
    );

    ParsedResume {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        skills: extraction.combined(),
        education: sections.education,
        work_experience: sections.work_experience,
        projects_certifications: sections.projects_certifications,
    }
}
