// src/forms/skills.rs

/// Ordered list of required skills as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed skill; blanks and duplicates are ignored
    pub fn add(&mut self, input: &str) -> bool {
        let skill = input.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for skill in iter {
            set.add(skill.as_ref());
        }
        set
    }
}
