use anyhow::{anyhow, Error};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use unidecode::unidecode;

lazy_static! {
    static ref FORBIDDEN_NAME_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(name: &str) -> String {
    let name = unidecode(name);
    FORBIDDEN_NAME_CHARACTERS_REGEX
        .replace_all(&name.to_lowercase(), "")
        .into()
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Category {
    RoadSigns,
    TrafficRules,
    Safety,
    Parking,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::RoadSigns,
        Category::TrafficRules,
        Category::Safety,
        Category::Parking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RoadSigns => "Road Signs",
            Category::TrafficRules => "Traffic Rules",
            Category::Safety => "Safety",
            Category::Parking => "Parking",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::RoadSigns
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(name);
        Category::ALL
            .iter()
            .find(|c| sanitize(c.as_str()) == sanitized)
            .copied()
            .ok_or_else(|| anyhow!("Unknown category: {}", name))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(name);
        Difficulty::ALL
            .iter()
            .find(|d| d.as_str() == sanitized)
            .copied()
            .ok_or_else(|| anyhow!("Unknown difficulty: {}", name))
    }
}
