mod render;
mod settings;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use transcript_analyzer_core::analysis::domain::semantic_analyzer::SemanticAnalyzer;
use transcript_analyzer_core::analysis::infrastructure::cached_analyzer::{
    response_cache_dir, CachedAnalyzer,
};
use transcript_analyzer_core::analysis::infrastructure::watson_analyzer::WatsonAnalyzer;
use transcript_analyzer_core::lexicon::domain::lexical_scorer::{LexicalScorer, MatchMode};
use transcript_analyzer_core::lexicon::infrastructure::word_list_loader;
use transcript_analyzer_core::pipeline::analysis_executor::AnalysisExecutor;
use transcript_analyzer_core::pipeline::analyze_transcript_use_case::AnalyzeTranscriptUseCase;
use transcript_analyzer_core::pipeline::infrastructure::sequential_analysis_executor::SequentialAnalysisExecutor;
use transcript_analyzer_core::pipeline::infrastructure::threaded_analysis_executor::ThreadedAnalysisExecutor;
use transcript_analyzer_core::pipeline::report_logger::LogReportLogger;
use transcript_analyzer_core::shared::constants::DEFAULT_CACHE_TTL_SECS;
use transcript_analyzer_core::transcript::domain::caption_reader::CaptionReader;
use transcript_analyzer_core::transcript::infrastructure::webvtt_reader::WebVttReader;

use settings::Settings;

/// Per-speaker language analysis for speaker-labeled WebVTT transcripts.
#[derive(Parser)]
#[command(name = "transcript-analyzer")]
struct Cli {
    /// WebVTT file whose cues read "Speaker: text".
    file: PathBuf,

    /// Watson Natural Language Understanding API key.
    #[arg(env = "WATSON_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Watson NLU instance URL (falls back to the settings file).
    #[arg(long, env = "WATSON_NLU_URL")]
    service_url: Option<String>,

    /// Replace the bundled weasel-word list (one entry per line).
    #[arg(long)]
    weasel_words: Option<PathBuf>,

    /// Replace the bundled hedge-word list (one entry per line).
    #[arg(long)]
    hedge_words: Option<PathBuf>,

    /// Replace the bundled filler-word list (one entry per line).
    #[arg(long)]
    filler_words: Option<PathBuf>,

    /// Indicator matching: substring or word-boundary.
    #[arg(long, default_value = "substring")]
    match_mode: String,

    /// Output format: table or json.
    #[arg(long, default_value = "table")]
    format: String,

    /// Concurrent analysis requests (1 = one at a time).
    #[arg(long)]
    jobs: Option<usize>,

    /// Seconds a cached analysis response stays valid.
    #[arg(long)]
    cache_ttl: Option<u64>,

    /// Always query the service, bypassing the response cache.
    #[arg(long)]
    no_cache: bool,

    /// List cues that were dropped for lacking a speaker tag.
    #[arg(long)]
    show_skipped: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = Settings::load();
    let service_url = resolve_service_url(&cli, &settings)?;
    let jobs = cli.jobs.or(settings.jobs).unwrap_or(1).max(1);
    let cache_ttl = cli
        .cache_ttl
        .or(settings.cache_ttl_secs)
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);

    let cues = WebVttReader::new().read_cues(&cli.file)?;
    log::info!("Read {} cues from {}", cues.len(), cli.file.display());

    let word_lists = word_list_loader::load_all(
        cli.weasel_words.as_deref(),
        cli.hedge_words.as_deref(),
        cli.filler_words.as_deref(),
    )?;
    let scorer = LexicalScorer::new(parse_match_mode(&cli.match_mode));
    let analyzer = build_analyzer(&service_url, &cli.api_key, cli.no_cache, cache_ttl)?;
    let executor: Box<dyn AnalysisExecutor> = if jobs > 1 {
        log::info!("Issuing up to {jobs} analysis requests at a time");
        Box::new(ThreadedAnalysisExecutor::new(jobs))
    } else {
        Box::new(SequentialAnalysisExecutor::new())
    };

    let mut use_case = AnalyzeTranscriptUseCase::new(
        word_lists,
        scorer,
        analyzer,
        executor,
        Some(Box::new(LogReportLogger::new())),
    );
    let report = use_case.execute(&cues)?;

    if cli.format == "json" {
        println!("{}", render::render_json(&report)?);
    } else {
        let colored = std::io::stdout().is_terminal();
        print!("{}", render::render_report(&report, cli.show_skipped, colored));
    }

    Ok(())
}

fn build_analyzer(
    service_url: &str,
    api_key: &str,
    no_cache: bool,
    cache_ttl: u64,
) -> Result<Box<dyn SemanticAnalyzer>, Box<dyn std::error::Error>> {
    let watson = WatsonAnalyzer::new(service_url, api_key)?;
    log::info!("Analyzing with {}", watson.endpoint());

    if no_cache {
        return Ok(Box::new(watson));
    }
    match response_cache_dir() {
        Some(dir) => {
            log::debug!("Caching responses in {} for {cache_ttl}s", dir.display());
            let namespace = watson.cache_namespace();
            Ok(Box::new(CachedAnalyzer::new(
                Box::new(watson),
                dir,
                Duration::from_secs(cache_ttl),
                namespace,
            )))
        }
        None => {
            log::warn!("No cache directory on this platform; responses will not be cached");
            Ok(Box::new(watson))
        }
    }
}

fn resolve_service_url(
    cli: &Cli,
    settings: &Settings,
) -> Result<String, Box<dyn std::error::Error>> {
    let url = cli
        .service_url
        .clone()
        .or_else(|| settings.service_url.clone())
        .ok_or("No Watson service URL: pass --service-url, set WATSON_NLU_URL or add service_url to the settings file")?;
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(format!("Service URL must start with http:// or https://, got '{url}'").into());
    }
    Ok(url)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.file.exists() {
        return Err(format!("Transcript file not found: {}", cli.file.display()).into());
    }
    if cli.api_key.trim().is_empty() {
        return Err("API key must not be empty".into());
    }
    for path in [&cli.weasel_words, &cli.hedge_words, &cli.filler_words]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            return Err(format!("Word list not found: {}", path.display()).into());
        }
    }
    if cli.match_mode != "substring" && cli.match_mode != "word-boundary" {
        return Err(format!(
            "Match mode must be 'substring' or 'word-boundary', got '{}'",
            cli.match_mode
        )
        .into());
    }
    if cli.format != "table" && cli.format != "json" {
        return Err(format!("Format must be 'table' or 'json', got '{}'", cli.format).into());
    }
    if cli.jobs == Some(0) {
        return Err("Jobs must be at least 1".into());
    }
    if cli.cache_ttl == Some(0) {
        return Err("Cache TTL must be positive; use --no-cache to disable caching".into());
    }
    Ok(())
}

fn parse_match_mode(mode: &str) -> MatchMode {
    if mode == "word-boundary" {
        MatchMode::WordBoundary
    } else {
        MatchMode::Substring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(["transcript-analyzer"].iter().chain(args)).unwrap()
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(validate(&cli(&[path, "key"])).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        let err = validate(&cli(&["/no/such/transcript.vtt", "key"])).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_rejects_unknown_options() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        for args in [
            vec![path, "key", "--match-mode", "fuzzy"],
            vec![path, "key", "--format", "xml"],
            vec![path, "key", "--jobs", "0"],
            vec![path, "key", "--cache-ttl", "0"],
            vec![path, " ", "--format", "json"],
            vec![path, "key", "--hedge-words", "/no/such/list.txt"],
        ] {
            assert!(validate(&cli(&args)).is_err(), "accepted {args:?}");
        }
    }

    #[test]
    fn test_service_url_flag_overrides_settings() {
        let settings = Settings {
            service_url: Some("https://from-settings.example.com".to_string()),
            ..Default::default()
        };
        let parsed = cli(&["t.vtt", "key", "--service-url", "https://flag.example.com"]);
        assert_eq!(
            resolve_service_url(&parsed, &settings).unwrap(),
            "https://flag.example.com"
        );
    }

    #[test]
    fn test_service_url_falls_back_to_settings() {
        let settings = Settings {
            service_url: Some("https://from-settings.example.com".to_string()),
            ..Default::default()
        };
        let mut parsed = cli(&["t.vtt", "key"]);
        parsed.service_url = None;
        assert_eq!(
            resolve_service_url(&parsed, &settings).unwrap(),
            "https://from-settings.example.com"
        );
    }

    #[test]
    fn test_service_url_required_and_checked() {
        let mut parsed = cli(&["t.vtt", "key"]);
        parsed.service_url = None;
        assert!(resolve_service_url(&parsed, &Settings::default()).is_err());

        parsed.service_url = Some("nlu.example.com".to_string());
        assert!(resolve_service_url(&parsed, &Settings::default()).is_err());
    }

    #[test]
    fn test_parse_match_mode() {
        assert_eq!(parse_match_mode("word-boundary"), MatchMode::WordBoundary);
        assert_eq!(parse_match_mode("substring"), MatchMode::Substring);
    }
}
