mod fetcher;
mod pipeline;
mod render;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use clap::Parser;

use fetcher::FetchError;
use pipeline::rank::TOP_N;
use pipeline::tokenize::TokenizerKind;
use pipeline::PipelineConfig;
use render::ChartKind;
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "wordfreq",
    about = "Fetch an article, count word frequencies, draw a word cloud and a chart"
)]
struct Cli {
    /// Article URL. Nothing runs when empty.
    url: Option<String>,

    /// Minimum word frequency to keep (inclusive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=100))]
    min_freq: Option<u64>,

    /// Chart drawn over the top 20 words
    #[arg(short, long, value_enum)]
    chart: Option<ChartKind>,

    /// Segmentation strategy
    #[arg(short, long, value_enum)]
    tokenizer: Option<TokenizerKind>,

    /// HTML report path
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Skip writing the HTML report
    #[arg(long)]
    no_html: bool,

    /// Print the top 20 as JSON `[word, count]` pairs
    #[arg(long)]
    json: bool,

    /// Remove HTML tags and entities before tokenizing
    #[arg(long)]
    strip_markup: bool,
}

impl Cli {
    /// Flags win over loaded settings.
    fn resolve(&self, mut settings: Settings) -> anyhow::Result<Settings> {
        if let Some(m) = self.min_freq {
            settings.min_freq = m;
        }
        if let Some(c) = self.chart {
            settings.chart = c;
        }
        if let Some(t) = self.tokenizer {
            settings.tokenizer = t;
        }
        if let Some(ref o) = self.out {
            settings.output = o.clone();
        }
        settings.strip_markup |= self.strip_markup;
        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(url) = normalize_url(cli.url.as_deref()) else {
        return;
    };

    if let Err(err) = run(&cli, url).await {
        eprintln!("{}", user_message(&err));
        std::process::exit(1);
    }
}

/// Trimmed URL, or `None` when there is nothing to fetch.
fn normalize_url(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|u| !u.is_empty())
}

async fn run(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let client = fetcher::client().context("Failed to build HTTP client")?;
    analyze(cli, url, &client).await
}

async fn analyze(cli: &Cli, url: &str, client: &reqwest::Client) -> anyhow::Result<()> {
    let t0 = Instant::now();
    let settings = cli.resolve(Settings::load()?)?;

    let doc = fetcher::fetch_with_spinner(client, url).await?;

    let tokenizer = settings.tokenizer.build();
    let cfg = PipelineConfig {
        min_freq: settings.min_freq,
        top_n: TOP_N,
        strip_markup: settings.strip_markup,
    };
    let out = pipeline::run(&doc.text, tokenizer.as_ref(), &cfg);

    // Everything that can fail happens before anything is printed.
    if !cli.no_html {
        let report = render::html::Report {
            url: &doc.url,
            chart: settings.chart,
            min_freq: settings.min_freq,
            generated_at: Local::now(),
        };
        let page = render::html::render(&report, &out.filtered, &out.top);
        render::html::write(&settings.output, &page)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string(&out.top)?);
        return Ok(());
    }

    print!("{}", render::table::format_table(&out.top));
    println!(
        "\n{} tokens | {} distinct | {} with count >= {}",
        out.token_count,
        out.distinct,
        out.filtered.len(),
        settings.min_freq
    );
    if !cli.no_html {
        println!("Report: {}", settings.output.display());
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_duration(elapsed));
    }
    Ok(())
}

/// One line for the user: request failures vs. everything else.
fn user_message(err: &anyhow::Error) -> String {
    if err.downcast_ref::<FetchError>().is_some() {
        format!("请求错误: {:#}", err)
    } else {
        format!("发生错误: {:#}", err)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
