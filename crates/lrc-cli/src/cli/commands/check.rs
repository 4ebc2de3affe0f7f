//! `lrc check` – resolve link targets to safety verdicts and print them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::Mutex;

use lrc_core::cache::{self, ReputationCache};
use lrc_core::check::{DeepScan, HttpDeepScan, HttpThreatList, ThreatListCheck};
use lrc_core::config::LrcConfig;
use lrc_core::resolver::{VerdictResolver, DEFAULT_SETTLE_DELAY};
use lrc_core::url_norm::{self, UrlKey};
use lrc_core::verdict::VerdictReport;

pub async fn run_check(cfg: &LrcConfig, urls: &[String], json: bool, wait_deep: bool) -> Result<()> {
    let cache = Arc::new(Mutex::new(ReputationCache::new(cfg.cache_ttl())));
    tokio::spawn(cache::run_sweep_loop(
        Arc::clone(&cache),
        cfg.sweep_interval(),
    ));

    let threat_list: Arc<dyn ThreatListCheck> = Arc::new(HttpThreatList::new(
        cfg.primary.endpoint.clone(),
        cfg.primary.api_key.clone(),
        Duration::from_secs(cfg.primary.timeout_secs),
    ));

    let secondary = cfg.configured_secondary();
    let deep_scan: Option<Arc<dyn DeepScan>> = secondary.map(|s| {
        Arc::new(HttpDeepScan::new(
            s.endpoint.clone(),
            s.api_key.clone(),
            Duration::from_secs(s.timeout_secs),
        )) as Arc<dyn DeepScan>
    });
    let settle_delay = secondary
        .map(|s| Duration::from_secs(s.settle_delay_secs))
        .unwrap_or(DEFAULT_SETTLE_DELAY);
    let has_deep_scan = deep_scan.is_some();

    let resolver = VerdictResolver::new(Arc::clone(&cache), threat_list, deep_scan, settle_delay);

    for url in urls {
        let verdict = resolver.resolve(url).await;
        print_verdict(url, &VerdictReport::from_verdict(&verdict, None), json);
    }

    if wait_deep && has_deep_scan {
        // Detached deep scans outlive resolve(); linger long enough for
        // them to land, then show what they revised.
        let grace = settle_delay + Duration::from_secs(5);
        if !json {
            println!("waiting {}s for deep scan results...", grace.as_secs());
        }
        tokio::time::sleep(grace).await;

        let cache = cache.lock().await;
        let now = Instant::now();
        for url in urls {
            let Ok(normalized) = url_norm::normalize(url) else {
                continue;
            };
            let key = UrlKey::from_normalized(&normalized);
            if let Some(entry) = cache.get(&key, now) {
                // original_check is only set once a deep scan overwrote the
                // primary verdict.
                if entry.original_check.is_some() {
                    let report =
                        VerdictReport::from_verdict(&entry.verdict, entry.original_check.as_ref());
                    print_verdict(url, &report, json);
                }
            }
        }
    }

    Ok(())
}

fn print_verdict(url: &str, report: &VerdictReport, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "url": url, "result": report }));
        return;
    }

    let label = if report.is_safe { "SAFE" } else { "UNSAFE" };
    let mut line = format!("{:<7} {}", label, url);
    if !report.threats.is_empty() {
        line.push_str(&format!("  threats: {}", report.threats.join(", ")));
    }
    if let Some(score) = report.score {
        line.push_str(&format!("  score: {score}"));
    }
    if let Some(error) = &report.error {
        line.push_str(&format!("  ({error})"));
    }
    println!("{line}");
}
