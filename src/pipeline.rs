use anyhow::{anyhow, Result};
use std::{fs, path::Path};

use yt_transcripts::{
    formats, GenericProxyConfig, Snippet, Transcript, TranscriptApi, TranscriptList,
};

use crate::{
    cli::{FetchCmd, Format, ListCmd},
    config::Config,
};

pub fn run_fetch(cmd: FetchCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("fetch", video_id = cmd.video_id.as_str(), to = ?cmd.to);
    let _g = span.enter();

    let api = build_api(cfg)?;
    let list = api.list(&cmd.video_id)?;
    tracing::info!(tracks = list.all().len(), "caption tracks discovered");

    let codes: Vec<&str> = cmd.languages.iter().map(String::as_str).collect();
    let transcript = select_transcript(&list, &codes, &cmd)?;
    tracing::info!(
        language = transcript.language_code(),
        generated = transcript.is_generated(),
        "track selected"
    );

    // Caption URLs are short-lived; fetch right after resolution.
    let snippets: Vec<Snippet> = match &cmd.translate {
        Some(target) => {
            let translated = transcript.translate(target);
            tracing::info!(tlang = target.as_str(), "fetching machine translation");
            translated.fetch()?.to_vec()
        }
        None => transcript.fetch()?.to_vec(),
    };

    if snippets.is_empty() {
        tracing::warn!("transcript resolved but its payload yielded no snippets");
    }
    log_snippet_summary(&snippets, cfg);

    let rendered = render(&snippets, cmd.to, cfg)?;

    if cmd.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = derive_output_path(&cmd);
    write_output(&out_path, &rendered, cmd.overwrite)?;
    tracing::info!(path = out_path.as_str(), "wrote output file");

    Ok(())
}

pub fn run_list(cmd: ListCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("list", video_id = cmd.video_id.as_str());
    let _g = span.enter();

    let api = build_api(cfg)?;
    let list = api.list(&cmd.video_id)?;

    for transcript in list.all() {
        let kind = if transcript.is_generated() {
            "generated"
        } else {
            "manual"
        };
        let translatable = if transcript.is_translatable() {
            " [translatable]"
        } else {
            ""
        };
        println!(
            "{:<10} {} ({kind}){translatable}",
            transcript.language_code(),
            transcript.language_name()
        );
    }

    Ok(())
}

fn build_api(cfg: &Config) -> Result<TranscriptApi> {
    let client_cfg = cfg.http.to_client_config();

    let api = match &cfg.http.proxy {
        Some(url) => {
            let proxy = GenericProxyConfig::new(url.clone());
            TranscriptApi::with_config(&client_cfg, Some(&proxy))?
        }
        None => TranscriptApi::with_config(&client_cfg, None)?,
    };

    Ok(api)
}

fn select_transcript<'a>(
    list: &'a TranscriptList,
    codes: &[&str],
    cmd: &FetchCmd,
) -> Result<&'a Transcript> {
    let transcript = if cmd.manual_only {
        list.find_manually_created_transcript(codes)?
    } else if cmd.generated_only {
        list.find_generated_transcript(codes)?
    } else {
        list.find_transcript(codes, true)?
    };
    Ok(transcript)
}

fn log_snippet_summary(snippets: &[Snippet], cfg: &Config) {
    let duration = snippets.last().map(Snippet::end).unwrap_or(0.0);
    tracing::info!(
        snippets = snippets.len(),
        duration_secs = duration,
        "transcript summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_snippet_samples.min(snippets.len());
        for (i, s) in snippets.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                start = s.start,
                duration = s.duration,
                chars = s.text.chars().count(),
                "snippet sample"
            );
        }
    }
}

fn render(snippets: &[Snippet], fmt: Format, cfg: &Config) -> Result<String> {
    let out = match fmt {
        Format::Srt => formats::srt::write_srt(snippets),
        Format::Vtt => formats::vtt::write_vtt(snippets),
        Format::Txt => formats::txt::write_txt(snippets, &cfg.formats.txt.separator),
        Format::Json => formats::json::write_json(snippets, cfg.formats.json.pretty)?,
    };
    Ok(out)
}

fn derive_output_path(cmd: &FetchCmd) -> String {
    cmd.output
        .clone()
        .unwrap_or_else(|| format!("{}.{}", cmd.video_id, cmd.to.extension()))
}

fn write_output(path: &str, data: &str, overwrite: bool) -> Result<()> {
    if Path::new(path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {path}"
        ));
    }
    fs::write(path, data)?;
    Ok(())
}
