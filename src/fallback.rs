use eyre::Result;
use log::debug;
use yt_transcript_rs::FetchedTranscript;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetch a transcript through the yt-transcript-rs library, used when the
/// official captions path comes up empty.
pub async fn fetch_fallback(video_id: &str, lang: &str) -> Result<String> {
    let api = YouTubeTranscriptApi::new(None, None, None)
        .map_err(|e| eyre::eyre!("failed to build transcript API client: {e}"))?;

    let languages = language_priority(lang);
    debug!("Fallback transcript fetch for {video_id}, languages {languages:?}");

    let transcript = api
        .fetch_transcript(video_id, &languages, false)
        .await
        .map_err(|e| eyre::eyre!("fallback transcript fetch failed for {video_id}: {e}"))?;

    Ok(join_snippets(&transcript))
}

/// Preferred language first, English as a second try
fn language_priority(lang: &str) -> Vec<&str> {
    if lang == "en" { vec!["en"] } else { vec![lang, "en"] }
}

fn join_snippets(transcript: &FetchedTranscript) -> String {
    transcript
        .snippets
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
