use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 一組午餐夥伴，序列化為 `["A", "B"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair(pub String, pub String);

impl Pair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self(a.into(), b.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0 == name || self.1 == name
    }
}

/// 歷史中的一輪配對
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    #[serde(
        default,
        deserialize_with = "deserialize_round_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    pub buddies: Vec<Pair>,
}

impl PairingRound {
    pub fn new(date: DateTime<Utc>, buddies: Vec<Pair>) -> Self {
        Self {
            date: Some(date),
            buddies,
        }
    }
}

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC and
/// a bare date as midnight UTC.
pub fn parse_round_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

// 舊歷史檔的日期格式不一定帶時區
fn deserialize_round_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => parse_round_date(value.trim()).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid ISO-8601 date: {}", value))
        }),
    }
}

/// 某位候選人本輪仍可配對的對象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialPairing {
    pub name: String,
    /// Other current candidates not yet paired with `name`, in roster order.
    pub partners: Vec<String>,
    /// Number of past rounds `name` took part in. Zero means first-timer.
    pub play_count: usize,
}

impl PotentialPairing {
    pub fn is_first_timer(&self) -> bool {
        self.play_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partner {
    Buddy(String),
    /// Left out so the rest of an odd roster can pair up.
    SitsOut,
    /// No valid partner was left for this candidate in this draw.
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub name: String,
    pub partner: Partner,
}

impl Pairing {
    pub fn buddy(name: impl Into<String>, buddy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partner: Partner::Buddy(buddy.into()),
        }
    }

    pub fn sits_out(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partner: Partner::SitsOut,
        }
    }

    pub fn unmatched(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partner: Partner::Unmatched,
        }
    }

    /// 名字或夥伴是否為此人
    pub fn involves(&self, person: &str) -> bool {
        self.name == person || matches!(&self.partner, Partner::Buddy(b) if b == person)
    }
}

/// One proposed assignment of the whole roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draw {
    pub pairings: Vec<Pairing>,
}

impl Draw {
    pub fn new(pairings: Vec<Pairing>) -> Self {
        Self { pairings }
    }

    pub fn is_assigned(&self, person: &str) -> bool {
        self.pairings.iter().any(|p| p.involves(person))
    }

    pub fn pairs(&self) -> Vec<Pair> {
        self.pairings
            .iter()
            .filter_map(|p| match &p.partner {
                Partner::Buddy(buddy) => Some(Pair::new(p.name.clone(), buddy.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn unmatched(&self) -> Vec<&str> {
        self.pairings
            .iter()
            .filter(|p| p.partner == Partner::Unmatched)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn has_unmatched(&self) -> bool {
        self.pairings.iter().any(|p| p.partner == Partner::Unmatched)
    }

    pub fn sitting_out(&self) -> Option<&str> {
        self.pairings
            .iter()
            .find(|p| p.partner == Partner::SitsOut)
            .map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}
