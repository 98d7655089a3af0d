//! Check orchestration.
//!
//! Drives the full sequence per plugin: resolve the latest version,
//! compare against the recorded ones, and reconcile a tracking issue for
//! outdated plugins. Fully sequential; a resolution failure skips that
//! plugin and moves on.

use std::io::Write;

use chrono::Utc;

use crate::checker;
use crate::github::HostApi;
use crate::issues::IssueReconciler;
use crate::model::{CheckReport, IssueOutcome, Plugin, PluginReport, PluginStatus};

pub struct CheckRunner<'a> {
    api: &'a dyn HostApi,
    reconciler: IssueReconciler<'a>,
}

impl<'a> CheckRunner<'a> {
    pub fn new(api: &'a dyn HostApi, target_repo: impl Into<String>, dry_run: bool) -> Self {
        Self {
            api,
            reconciler: IssueReconciler::new(api, target_repo, dry_run),
        }
    }

    /// Checks every plugin in order and returns the aggregate report.
    pub async fn run(&self, plugins: &[Plugin]) -> CheckReport {
        let mut updates_found = 0;
        let mut errors = 0;
        let mut reports = Vec::with_capacity(plugins.len());

        for plugin in plugins {
            print!("Checking {}... ", plugin.name);
            let _ = std::io::stdout().flush();

            let latest = match checker::resolve_latest(self.api, plugin).await {
                Ok(latest) => latest,
                Err(e) => {
                    println!("ERROR");
                    eprintln!("Error fetching version for {}: {e}", plugin.name);
                    errors += 1;
                    reports.push(PluginReport {
                        name: plugin.name.clone(),
                        repo: plugin.slug(),
                        status: PluginStatus::Error {
                            message: e.to_string(),
                        },
                    });
                    continue;
                }
            };

            if !checker::any_outdated(plugin, &latest) {
                println!("OK");
                reports.push(PluginReport {
                    name: plugin.name.clone(),
                    repo: plugin.slug(),
                    status: PluginStatus::UpToDate,
                });
                continue;
            }

            println!("UPDATE AVAILABLE: {latest}");

            let issue = self.reconciler.reconcile(plugin, &latest).await;
            match issue {
                IssueOutcome::AlreadyExists => {
                    println!("  Issue already exists, skipping");
                }
                IssueOutcome::Created { .. } | IssueOutcome::DryRun | IssueOutcome::Failed => {
                    updates_found += 1;
                }
            }

            reports.push(PluginReport {
                name: plugin.name.clone(),
                repo: plugin.slug(),
                status: PluginStatus::UpdateAvailable { latest, issue },
            });
        }

        print_summary(plugins.len(), updates_found, errors);

        CheckReport {
            checked_at: Utc::now(),
            plugins_checked: plugins.len(),
            updates_found,
            errors,
            plugins: reports,
        }
    }
}

fn print_summary(checked: usize, updates: usize, errors: usize) {
    println!();
    println!("{}", "=".repeat(50));
    println!("Summary:");
    println!("  Plugins checked: {checked}");
    println!("  Updates found: {updates}");
    println!("  Errors: {errors}");
}
