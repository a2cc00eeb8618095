use anyhow::{Context, Result};
use chartscrape::{
    chart::{scan_document, DocumentCharts, ScanOptions},
    fetch::{self, Input},
};
use chrono::Utc;
use reqwest::Client;
use scraper::Html;
use std::{env, fs, path::PathBuf, process::exit, sync::Arc};
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let mut raw_inputs = Vec::new();
    let mut options_path: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from("charts");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" => match args.next() {
                Some(path) => options_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "--out" => match args.next() {
                Some(dir) => out_dir = PathBuf::from(dir),
                None => usage(),
            },
            _ => raw_inputs.push(arg),
        }
    }
    if raw_inputs.is_empty() {
        usage();
    }

    let options = match &options_path {
        Some(path) => ScanOptions::from_yaml_file(path)?,
        None => ScanOptions::default(),
    };
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    // ─── 3) expand inputs ────────────────────────────────────────────
    let mut inputs = Vec::new();
    for arg in raw_inputs {
        match Input::parse(&arg) {
            Input::Url(url) => inputs.push(Input::Url(url)),
            Input::Path(path) => {
                let pattern = path.to_string_lossy();
                if pattern.contains(&['*', '?', '['][..]) {
                    let paths =
                        glob::glob(&pattern).with_context(|| format!("bad glob {}", pattern))?;
                    for entry in paths {
                        match entry {
                            Ok(path) => inputs.push(Input::Path(path)),
                            Err(e) => error!("skipping unreadable path: {}", e),
                        }
                    }
                } else {
                    inputs.push(Input::Path(path));
                }
            }
        }
    }
    if inputs.is_empty() {
        info!("no documents matched; exit");
        return Ok(());
    }
    info!("{} documents to scan", inputs.len());

    // ─── 4) spawn loader tasks ───────────────────────────────────────
    let client = Client::new();
    let (tx, mut rx) = mpsc::channel::<std::result::Result<(String, String), String>>(100);
    let load_sem = Arc::new(Semaphore::new(4));
    let mut handles = Vec::with_capacity(inputs.len());

    for input in inputs {
        let client = client.clone();
        let tx = tx.clone();
        let sem = load_sem.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let name = input.name();
            info!(name = %name, "loading");
            match fetch::load_document(&client, &input).await {
                Ok(html) => {
                    let _ = tx.send(Ok((name, html))).await;
                }
                Err(err) => {
                    error!("{} failed: {}", name, err);
                    let _ = tx.send(Err(name)).await;
                }
            }
        }));
    }
    // drop the original sender so `rx.recv()` ends once all loads complete
    drop(tx);

    // ─── 5) scan documents one at a time ─────────────────────────────
    let options = Arc::new(options);
    let mut scanned = 0usize;
    let mut failed = 0usize;

    while let Some(msg) = rx.recv().await {
        match msg {
            Ok((name, html)) => {
                let options = Arc::clone(&options);
                let out_path = out_dir.join(format!("{}.charts.json", name));

                // scraper's Html is not Send: parse and scan on the blocking pool
                let result = tokio::task::spawn_blocking(move || {
                    let document = Html::parse_document(&html);
                    let charts = scan_document(&document, &options);
                    let bundle = DocumentCharts {
                        document: name.clone(),
                        generated_at: Utc::now(),
                        charts,
                    };
                    let json = serde_json::to_string_pretty(&bundle)
                        .with_context(|| format!("serializing charts for {}", name))?;
                    fs::write(&out_path, json)
                        .with_context(|| format!("writing {}", out_path.display()))?;
                    Ok::<_, anyhow::Error>((name, bundle.charts.len(), out_path))
                })
                .await?;

                match result {
                    Ok((name, count, path)) => {
                        scanned += 1;
                        info!(name = %name, charts = count, "wrote {}", path.display());
                    }
                    Err(err) => {
                        failed += 1;
                        error!("scan failed: {}", err);
                    }
                }
            }
            Err(_name) => {
                // already logged by the loader
                failed += 1;
            }
        }
    }

    // ─── 6) await all loader tasks ───────────────────────────────────
    for h in handles {
        let _ = h.await;
    }

    info!(scanned, failed, "done");
    Ok(())
}

fn usage() -> ! {
    eprintln!("Usage: chartscrape [--options FILE] [--out DIR] <HTML_FILE|GLOB|URL>...");
    exit(1);
}
