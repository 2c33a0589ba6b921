use std::cell::RefCell;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use navkit_history::{HistoryChange, HistoryConfig, NavigationHistory, UrlNormalizer};
use tracing::{debug, info_span};

use navkit_cli::script::{parse_script, replay};
use navkit_cli::summary::{render_event, render_json, render_plain, render_table};

use crate::cli::{ConfigArgs, NormalizeArgs, OutputFormatArg, ReplayArgs};

pub fn run_replay(args: &ReplayArgs) -> Result<()> {
    let span = info_span!("replay", script = %args.script.display());
    let _guard = span.enter();

    let text = read_script(&args.script)?;
    let steps = parse_script(&text).context("parse script")?;
    let config = load_config(args.config.as_deref())?;

    let mut history = NavigationHistory::with_config(&config);
    let events = Rc::new(RefCell::new(Vec::new()));
    if args.events {
        let sink = Rc::clone(&events);
        history.subscribe(move |change: &HistoryChange| {
            sink.borrow_mut().push(render_event(change));
        });
    }

    let outcome = replay(&steps, &mut history);
    debug!(
        applied = outcome.applied,
        effective = outcome.effective,
        "replay finished"
    );

    for line in events.borrow().iter() {
        println!("{line}");
    }

    let snapshot = history.snapshot();
    match args.format {
        OutputFormatArg::Plain => println!("{}", render_plain(&snapshot)),
        OutputFormatArg::Table => println!("{}", render_table(&snapshot)),
        OutputFormatArg::Json => println!("{}", render_json(&snapshot).context("encode state")?),
    }
    Ok(())
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    let normalizer = UrlNormalizer::new(config.normalize);

    let mut all_valid = true;
    for raw in &args.urls {
        match normalizer.try_normalize(raw) {
            Ok(url) => println!("{raw}\t{url}"),
            Err(reason) => {
                all_valid = false;
                println!("{raw}\trejected: {reason}");
            }
        }
    }
    Ok(all_valid)
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    if args.path {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => HistoryConfig::config_path()
                .ok_or_else(|| anyhow!("no configuration directory on this platform"))?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml().context("encode configuration")?);
    Ok(())
}

/// Strict when a path is given, lenient for the platform default.
fn load_config(path: Option<&Path>) -> Result<HistoryConfig> {
    match path {
        Some(path) => HistoryConfig::load_from(path)
            .with_context(|| format!("load configuration from {}", path.display())),
        None => Ok(HistoryConfig::load()),
    }
}

fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read script from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))
}
