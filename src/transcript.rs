use std::future::Future;

use eyre::Result;
use log::debug;

use crate::TranscriptSource;
use crate::{captions, fallback};

/// Outcome of a transcript lookup: text from one of the two sources, or an
/// explicit marker that neither produced anything. Never an error — missing
/// captions are an expected, common case.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    Found { text: String, source: TranscriptSource },
    Absent,
}

impl TranscriptOutcome {
    pub fn into_text(self) -> Option<String> {
        match self {
            TranscriptOutcome::Found { text, .. } => Some(text),
            TranscriptOutcome::Absent => None,
        }
    }
}

/// Try the official captions path first, then the fallback library.
pub async fn fetch_with_fallback(client: &reqwest::Client, video_id: &str, lang: &str) -> TranscriptOutcome {
    let primary = captions::fetch_captions(client, video_id, lang).await;
    resolve(primary, || fallback::fetch_fallback(video_id, lang)).await
}

/// A usable primary result wins outright and the secondary source is never
/// invoked. An error or a whitespace-only transcript from the primary makes
/// the secondary eligible; both coming up empty yields `Absent`.
pub async fn resolve<F, Fut>(primary: Result<String>, secondary: F) -> TranscriptOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    if let Some(found) = accept(primary, TranscriptSource::Captions) {
        return found;
    }
    match accept(secondary().await, TranscriptSource::Fallback) {
        Some(found) => found,
        None => TranscriptOutcome::Absent,
    }
}

fn accept(result: Result<String>, source: TranscriptSource) -> Option<TranscriptOutcome> {
    match result {
        Ok(text) if !text.trim().is_empty() => Some(TranscriptOutcome::Found { text, source }),
        Ok(_) => {
            debug!("{source} source returned an empty transcript");
            None
        }
        Err(e) => {
            debug!("{source} source failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_primary_wins_without_invoking_secondary() {
        let secondary_called = Cell::new(false);
        let outcome = resolve(Ok("from captions".to_string()), || {
            secondary_called.set(true);
            async { Ok("from fallback".to_string()) }
        })
        .await;

        assert_eq!(
            outcome,
            TranscriptOutcome::Found {
                text: "from captions".to_string(),
                source: TranscriptSource::Captions,
            }
        );
        assert!(!secondary_called.get());
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_fails() {
        let outcome = resolve(Err(eyre::eyre!("no captions")), || async {
            Ok("from fallback".to_string())
        })
        .await;

        assert_eq!(
            outcome,
            TranscriptOutcome::Found {
                text: "from fallback".to_string(),
                source: TranscriptSource::Fallback,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_primary_triggers_secondary() {
        let outcome = resolve(Ok("   \n".to_string()), || async {
            Ok("from fallback".to_string())
        })
        .await;

        assert_eq!(
            outcome,
            TranscriptOutcome::Found {
                text: "from fallback".to_string(),
                source: TranscriptSource::Fallback,
            }
        );
    }

    #[tokio::test]
    async fn test_absent_when_both_fail() {
        let outcome = resolve(Err(eyre::eyre!("no captions")), || async {
            Err(eyre::eyre!("no fallback either"))
        })
        .await;

        assert_eq!(outcome, TranscriptOutcome::Absent);
    }

    #[tokio::test]
    async fn test_absent_when_both_empty() {
        let outcome = resolve(Ok(String::new()), || async { Ok(String::new()) }).await;
        assert_eq!(outcome, TranscriptOutcome::Absent);
    }

    #[test]
    fn test_into_text() {
        let found = TranscriptOutcome::Found {
            text: "hello".to_string(),
            source: TranscriptSource::Captions,
        };
        assert_eq!(found.into_text(), Some("hello".to_string()));
        assert_eq!(TranscriptOutcome::Absent.into_text(), None);
    }
}
