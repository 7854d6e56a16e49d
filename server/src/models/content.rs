use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Emotional state a user can select. Pure selection value, not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Relax,
    Sad,
    Happy,
    Stressed,
    Motivated,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Relax => "relax",
            Mood::Sad => "sad",
            Mood::Happy => "happy",
            Mood::Stressed => "stressed",
            Mood::Motivated => "motivated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relax" => Some(Mood::Relax),
            "sad" => Some(Mood::Sad),
            "happy" => Some(Mood::Happy),
            "stressed" => Some(Mood::Stressed),
            "motivated" => Some(Mood::Motivated),
            _ => None,
        }
    }
}

/// Category of catalog content. The category decides which display field
/// is authoritative (see `AdminContent::into_item`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Music,
    Book,
    Quote,
    Recitation,
    Verse,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Music => "music",
            ContentKind::Book => "book",
            ContentKind::Quote => "quote",
            ContentKind::Recitation => "recitation",
            ContentKind::Verse => "verse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "music" => Some(ContentKind::Music),
            "book" => Some(ContentKind::Book),
            "quote" => Some(ContentKind::Quote),
            "recitation" => Some(ContentKind::Recitation),
            "verse" => Some(ContentKind::Verse),
            _ => None,
        }
    }
}

/// Catalog row as stored in `admin_content`
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminContent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_type: String,
    pub content_type: String,
    pub mood: String,
    pub file_url: Option<String>,
    pub file_name: String,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl AdminContent {
    pub fn kind(&self) -> Option<ContentKind> {
        ContentKind::parse(&self.content_type)
    }

    /// Normalize a catalog row into the uniform content record.
    ///
    /// Field selection by category:
    /// - music, recitation: the file URL is playable audio
    /// - book: the file URL is an embedded document, falling back to body text
    /// - quote, verse: description text only
    ///
    /// Returns `None` when the stored category is outside the closed set.
    pub fn into_item(self) -> Option<ContentItem> {
        let kind = self.kind()?;
        let description = self.description.unwrap_or_default();

        let (link, audio_url, book_content) = match kind {
            ContentKind::Music | ContentKind::Recitation => {
                (self.file_url.clone(), self.file_url, None)
            }
            ContentKind::Book => {
                let body = if description.is_empty() {
                    None
                } else {
                    Some(description.clone())
                };
                (self.file_url.clone(), None, self.file_url.or(body))
            }
            ContentKind::Quote | ContentKind::Verse => (None, None, None),
        };

        Some(ContentItem {
            id: self.id,
            kind,
            title: self.title,
            description,
            link,
            audio_url,
            book_content,
            bookmarked: false,
        })
    }
}

/// Uniform content record returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_content: Option<String>,
    pub bookmarked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(content_type: &str, description: Option<&str>, file_url: Option<&str>) -> AdminContent {
        AdminContent {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            description: description.map(String::from),
            file_type: "audio".to_string(),
            content_type: content_type.to_string(),
            mood: "relax".to_string(),
            file_url: file_url.map(String::from),
            file_name: "file.mp3".to_string(),
            uploaded_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn music_url_surfaces_as_audio_never_as_book_content() {
        let item = row("music", None, Some("https://cdn/x.mp3"))
            .into_item()
            .unwrap();
        assert_eq!(item.audio_url.as_deref(), Some("https://cdn/x.mp3"));
        assert_eq!(item.link.as_deref(), Some("https://cdn/x.mp3"));
        assert!(item.book_content.is_none());
    }

    #[test]
    fn recitation_url_is_playable_audio() {
        let item = row("recitation", None, Some("https://cdn/r.mp3"))
            .into_item()
            .unwrap();
        assert_eq!(item.audio_url.as_deref(), Some("https://cdn/r.mp3"));
    }

    #[test]
    fn book_prefers_file_url_over_body_text() {
        let item = row("book", Some("full text"), Some("https://cdn/b.pdf"))
            .into_item()
            .unwrap();
        assert_eq!(item.book_content.as_deref(), Some("https://cdn/b.pdf"));
        assert!(item.audio_url.is_none());
    }

    #[test]
    fn text_book_falls_back_to_body() {
        let item = row("book", Some("full text"), None).into_item().unwrap();
        assert_eq!(item.book_content.as_deref(), Some("full text"));
        assert!(item.link.is_none());
    }

    #[test]
    fn quote_and_verse_carry_description_only() {
        for kind in ["quote", "verse"] {
            let item = row(kind, Some("wisdom"), Some("https://cdn/ignored"))
                .into_item()
                .unwrap();
            assert_eq!(item.description, "wisdom");
            assert!(item.link.is_none());
            assert!(item.audio_url.is_none());
            assert!(item.book_content.is_none());
        }
    }

    #[test]
    fn unknown_category_yields_no_item() {
        assert!(row("video", None, None).into_item().is_none());
    }

    #[test]
    fn mood_and_kind_parse_closed_sets() {
        assert_eq!(Mood::parse("stressed"), Some(Mood::Stressed));
        assert_eq!(Mood::parse("angry"), None);
        assert_eq!(ContentKind::parse("verse"), Some(ContentKind::Verse));
        assert_eq!(ContentKind::parse("podcast"), None);
    }
}
