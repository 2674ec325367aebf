use crate::models::Skill;

/// All skills whose name or description contains `query` as a
/// case-insensitive substring, in catalog order. Callers pass a trimmed,
/// non-empty query; an empty query would match every skill.
pub fn substring_scan<'a>(skills: &'a [Skill], query: &str) -> Vec<&'a Skill> {
    let needle = query.to_lowercase();
    skills.iter().filter(|s| contains(s, &needle)).collect()
}

fn contains(skill: &Skill, needle: &str) -> bool {
    skill.name.to_lowercase().contains(needle)
        || skill.description.to_lowercase().contains(needle)
}
