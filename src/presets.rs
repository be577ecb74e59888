//! Built-in job description presets

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPreset {
    pub name: String,
    pub description: String,
}

impl JobPreset {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

pub fn default_presets() -> Vec<JobPreset> {
    vec![
        JobPreset::new(
            "Data Scientist",
            "Looking for a data scientist with strong Python and SQL skills. \
             Experience with machine learning, statistics, pandas, and data visualization required. \
             Familiarity with deep learning frameworks and cloud platforms is a plus.",
        ),
        JobPreset::new(
            "Frontend Developer",
            "We are hiring a frontend developer proficient in JavaScript, React, HTML, and CSS. \
             You will build responsive user interfaces, work with REST APIs, and collaborate with designers. \
             Experience with TypeScript and testing is a plus.",
        ),
        JobPreset::new(
            "Backend Developer",
            "Seeking a backend developer experienced in Java or Python, SQL databases, and REST API design. \
             Knowledge of Docker, cloud deployment, and microservices architecture is required.",
        ),
        JobPreset::new(
            "Machine Learning Engineer",
            "Machine learning engineer needed to design, train, and deploy models in production. \
             Strong Python, SQL, and experience with TensorFlow or PyTorch. \
             MLOps, Docker, and data pipeline experience preferred.",
        ),
    ]
}

/// Case-insensitive lookup by preset name.
pub fn find_preset<'a>(presets: &'a [JobPreset], name: &str) -> Option<&'a JobPreset> {
    let wanted = name.trim();
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets_are_unique_and_non_empty() {
        let presets = default_presets();
        assert!(!presets.is_empty());

        for (i, preset) in presets.iter().enumerate() {
            assert!(!preset.description.trim().is_empty());
            assert!(presets[i + 1..]
                .iter()
                .all(|other| !other.name.eq_ignore_ascii_case(&preset.name)));
        }
    }

    #[test]
    fn test_find_preset_ignores_case() {
        let presets = default_presets();

        let found = find_preset(&presets, "  frontend developer ").unwrap();
        assert_eq!(found.name, "Frontend Developer");
        assert!(find_preset(&presets, "Astronaut").is_none());
    }
}
