use std::io::BufRead;

use eyre::{Result, bail};

use crate::{VideoRecord, watch_url};

/// How many videos the interactive mode offers by default
const DEFAULT_COUNT: usize = 5;

const BLOCK_SEPARATOR: &str = "\n\n------------------------------------------------------------\n\n";

/// Generation inputs, identical whether they came from flags or from the
/// interactive prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParams {
    pub count: usize,
    pub language: String,
}

/// One prompt block per record, first `count` records in document order
pub fn generate_prompts(records: &[VideoRecord], params: &PromptParams) -> Vec<String> {
    records
        .iter()
        .take(params.count)
        .map(|record| render_prompt(record, &params.language))
        .collect()
}

/// Render a single summarization prompt ready to paste into a chat tool
pub fn render_prompt(record: &VideoRecord, language: &str) -> String {
    let transcript = record
        .transcript
        .as_deref()
        .unwrap_or("(no transcript is available for this video)");

    format!(
        "Please summarize the following YouTube video transcript.\n\
         \n\
         Title: {title}\n\
         URL: {url}\n\
         \n\
         Transcript:\n\
         {transcript}\n\
         \n\
         Structure the summary as:\n\
         ## Overview\n\
         Two or three sentences on what the video covers.\n\
         ## Key points\n\
         A numbered list of the main points.\n\
         ## Details\n\
         A longer explanation of the important parts.\n\
         ## Keywords\n\
         Comma-separated keywords.\n\
         \n\
         Write the summary in {language}.",
        title = record.title,
        url = watch_url(&record.id),
    )
}

pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join(BLOCK_SEPARATOR)
}

/// Plain watch-URL list, one line per video
pub fn render_url_list(records: &[VideoRecord], count: usize) -> String {
    records
        .iter()
        .take(count)
        .map(|record| format!("{}\t{}", watch_url(&record.id), record.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask the operator for count and language on stdin
pub fn params_interactive(total: usize, default_lang: &str) -> Result<PromptParams> {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    params_from_reader(&mut lock, total, default_lang)
}

pub fn params_from_reader<R: BufRead>(reader: &mut R, total: usize, default_lang: &str) -> Result<PromptParams> {
    let count = read_count(reader, total)?;
    let language = read_language(reader, default_lang)?;
    Ok(PromptParams { count, language })
}

fn read_count<R: BufRead>(reader: &mut R, total: usize) -> Result<usize> {
    loop {
        eprint!("Videos to include (1-{total}, default {}): ", DEFAULT_COUNT.min(total));
        let Some(line) = read_line(reader)? else {
            bail!("no input while reading video count");
        };
        if line.is_empty() {
            return Ok(DEFAULT_COUNT.min(total));
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=total).contains(&n) => return Ok(n),
            _ => eprintln!("Enter a number between 1 and {total}."),
        }
    }
}

fn read_language<R: BufRead>(reader: &mut R, default_lang: &str) -> Result<String> {
    eprint!("Summary language (default {default_lang}): ");
    let Some(line) = read_line(reader)? else {
        bail!("no input while reading language");
    };
    if line.is_empty() {
        Ok(default_lang.to_string())
    } else {
        Ok(line)
    }
}

/// One trimmed line, or None at EOF
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
