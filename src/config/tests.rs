use std::time::Duration;

use super::*;
use crate::args::GeneratorArgs;
use clap::Parser;

fn args_from(argv: &[&str]) -> Result<GeneratorArgs, String> {
    GeneratorArgs::try_parse_from(argv).map_err(|err| err.to_string())
}

#[test]
fn base_url_trailing_slash_is_dropped() -> Result<(), String> {
    let base = BaseUrl::parse("http://frontend-svc/").map_err(|err| err.to_string())?;
    if base.as_str() != "http://frontend-svc" {
        return Err(format!("Unexpected base: {}", base));
    }
    let url = base
        .endpoint("/rankings/top?limit=5")
        .map_err(|err| err.to_string())?;
    if url.as_str() != "http://frontend-svc/rankings/top?limit=5" {
        return Err(format!("Unexpected endpoint: {}", url));
    }
    Ok(())
}

#[test]
fn base_url_keeps_path_prefix() -> Result<(), String> {
    let base = BaseUrl::parse("https://example.test/app").map_err(|err| err.to_string())?;
    let url = base.endpoint("/api/score").map_err(|err| err.to_string())?;
    if url.as_str() != "https://example.test/app/api/score" {
        return Err(format!("Unexpected endpoint: {}", url));
    }
    Ok(())
}

#[test]
fn base_url_rejects_bad_input() -> Result<(), String> {
    for raw in ["frontend-svc", "ftp://frontend-svc", "http://host/?a=1", ""] {
        if BaseUrl::parse(raw).is_ok() {
            return Err(format!("Expected '{}' to be rejected", raw));
        }
    }
    Ok(())
}

#[test]
fn from_args_applies_interval_and_max_cycles() -> Result<(), String> {
    let args = args_from(&[
        "synthload",
        "--base-url",
        "http://localhost:9000",
        "--interval-seconds",
        "0",
        "--max-cycles",
        "2",
    ])?;
    let config = GeneratorConfig::from_args(&args).map_err(|err| err.to_string())?;

    if !config.interval.is_zero() {
        return Err(format!("Unexpected interval: {:?}", config.interval));
    }
    if config.max_cycles != Some(2) {
        return Err(format!("Unexpected max_cycles: {:?}", config.max_cycles));
    }
    if config.request_timeout != Duration::from_secs(5) {
        return Err(format!("Unexpected timeout: {:?}", config.request_timeout));
    }
    if config.jitter != JitterRange::new(Duration::from_secs(1), Duration::from_secs(3)) {
        return Err(format!("Unexpected jitter: {:?}", config.jitter));
    }
    if config.credentials.id != "demo" || config.credentials.pw != "demo" {
        return Err("Unexpected credentials".to_owned());
    }
    Ok(())
}

#[test]
fn from_args_rejects_invalid_base_url() -> Result<(), String> {
    let args = args_from(&["synthload", "--base-url", "not a url"])?;
    match GeneratorConfig::from_args(&args) {
        Ok(_) => Err("Expected invalid base URL to fail".to_owned()),
        Err(_) => Ok(()),
    }
}

#[test]
fn validate_rejects_inverted_jitter_and_zero_timeout() -> Result<(), String> {
    let base = BaseUrl::parse("http://localhost").map_err(|err| err.to_string())?;
    let mut config = GeneratorConfig::new(base);
    config.jitter = JitterRange::new(Duration::from_secs(3), Duration::from_secs(1));
    if config.validate().is_ok() {
        return Err("Expected inverted jitter to fail".to_owned());
    }
    config.jitter = JitterRange::default();
    config.request_timeout = Duration::ZERO;
    if config.validate().is_ok() {
        return Err("Expected zero timeout to fail".to_owned());
    }
    Ok(())
}

#[test]
fn jitter_samples_stay_in_range() -> Result<(), String> {
    let jitter = JitterRange::default();
    for _ in 0..1_000 {
        let delay = jitter.sample();
        if delay < DEFAULT_JITTER_MIN || delay >= DEFAULT_JITTER_MAX {
            return Err(format!("Delay out of range: {:?}", delay));
        }
    }
    if JitterRange::none().sample() != Duration::ZERO {
        return Err("Expected empty jitter to yield zero".to_owned());
    }
    Ok(())
}
