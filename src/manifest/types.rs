//! Course manifest data model.

use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use crate::asset::FormatKey;

/// Location value meaning "no asset registered yet" (besides the empty string).
pub const UNSET_SENTINEL: &str = "/assets/";

/// Course title of the fallback manifest.
pub const DEFAULT_COURSE_TITLE: &str = "AI SecOps Course";

/// Whether a stored location means "no asset registered yet".
#[inline]
pub fn is_unset_location(location: &str) -> bool {
    location.is_empty() || location == UNSET_SENTINEL
}

/// Whether `location` may be stored: unset, an absolute `http(s)` URL, or a
/// path with no whitespace, control characters or other URL scheme.
pub fn is_valid_location(location: &str) -> bool {
    if is_unset_location(location) {
        return true;
    }
    if let Ok(url) = Url::parse(location) {
        return matches!(url.scheme(), "http" | "https") && url.has_host();
    }
    !location.contains("://")
        && !location
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
}

/// One asset of one week.
///
/// `location` is written under `path` in the document, or `url` for quizzes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub title: String,

    /// Free-form label such as "Technical Walkthrough".
    pub format: String,

    #[serde(rename = "path")]
    pub location: String,

    pub description: String,
}

impl AssetRecord {
    pub fn is_unset(&self) -> bool {
        is_unset_location(&self.location)
    }
}

/// Asset object as found in a document, which may carry `path`, `url` or both.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAssetRecord {
    title: String,
    format: String,
    path: Option<String>,
    url: Option<String>,
    description: String,
}

impl RawAssetRecord {
    /// Quizzes read `url` first, every other format reads `path` first.
    fn into_record(self, key: FormatKey) -> AssetRecord {
        let location = match key {
            FormatKey::Quiz => self.url.or(self.path),
            _ => self.path.or(self.url),
        };
        AssetRecord {
            title: self.title,
            format: self.format,
            location: location.unwrap_or_default(),
            description: self.description,
        }
    }
}

/// Quiz records serialize their location under `url`.
fn serialize_url_record<S: Serializer>(record: &AssetRecord, s: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct UrlRecord<'a> {
        title: &'a str,
        format: &'a str,
        url: &'a str,
        description: &'a str,
    }

    UrlRecord {
        title: &record.title,
        format: &record.format,
        url: &record.location,
        description: &record.description,
    }
    .serialize(s)
}

/// The four assets of a week, one per format key.
///
/// A format missing from the document reads as an unset record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWeekAssets")]
pub struct WeekAssets {
    pub video: AssetRecord,
    pub slides: AssetRecord,
    pub infographic: AssetRecord,
    #[serde(serialize_with = "serialize_url_record")]
    pub quiz: AssetRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawWeekAssets {
    video: RawAssetRecord,
    slides: RawAssetRecord,
    infographic: RawAssetRecord,
    quiz: RawAssetRecord,
}

impl From<RawWeekAssets> for WeekAssets {
    fn from(raw: RawWeekAssets) -> Self {
        Self {
            video: raw.video.into_record(FormatKey::Video),
            slides: raw.slides.into_record(FormatKey::Slides),
            infographic: raw.infographic.into_record(FormatKey::Infographic),
            quiz: raw.quiz.into_record(FormatKey::Quiz),
        }
    }
}

impl WeekAssets {
    pub fn get(&self, key: FormatKey) -> &AssetRecord {
        match key {
            FormatKey::Video => &self.video,
            FormatKey::Slides => &self.slides,
            FormatKey::Infographic => &self.infographic,
            FormatKey::Quiz => &self.quiz,
        }
    }

    pub fn get_mut(&mut self, key: FormatKey) -> &mut AssetRecord {
        match key {
            FormatKey::Video => &mut self.video,
            FormatKey::Slides => &mut self.slides,
            FormatKey::Infographic => &mut self.infographic,
            FormatKey::Quiz => &mut self.quiz,
        }
    }

    /// Records in dashboard display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormatKey, &AssetRecord)> {
        FormatKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// One week of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekManifest {
    pub week_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assets: WeekAssets,
}

/// The whole course: title plus weeks in ascending week order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseManifest {
    pub course_title: String,

    /// Frameworks the course is mapped against (MAESTRO, OWASP, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,

    #[serde(default)]
    pub weeks: Vec<WeekManifest>,
}

impl CourseManifest {
    /// Manifest used whenever the real one cannot be loaded.
    pub fn fallback() -> Self {
        Self {
            course_title: DEFAULT_COURSE_TITLE.to_string(),
            frameworks: Vec::new(),
            weeks: Vec::new(),
        }
    }

    pub fn week(&self, week: u32) -> Option<&WeekManifest> {
        self.weeks.iter().find(|w| w.week_number == week)
    }

    pub fn week_mut(&mut self, week: u32) -> Option<&mut WeekManifest> {
        self.weeks.iter_mut().find(|w| w.week_number == week)
    }

    pub fn asset(&self, week: u32, key: FormatKey) -> Option<&AssetRecord> {
        self.week(week).map(|w| w.assets.get(key))
    }

    /// Week numbers must start at 1 and strictly ascend.
    pub fn validate(&self) -> Result<(), String> {
        let mut previous = 0;
        for week in &self.weeks {
            if week.week_number == 0 {
                return Err("week numbers start at 1".to_string());
            }
            if week.week_number <= previous {
                return Err(format!(
                    "week {} listed after week {}",
                    week.week_number, previous
                ));
            }
            previous = week.week_number;
        }
        Ok(())
    }

    /// Number of registered (non-unset) assets across all weeks.
    pub fn registered_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| w.assets.iter())
            .filter(|(_, record)| !record.is_unset())
            .count()
    }
}
