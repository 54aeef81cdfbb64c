// ABOUTME: Output formatting helpers for trimtally-cli
// ABOUTME: Renders achievement refreshes as a plain-text table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use trimtally_analytics::{AchievementRefresh, AchievementSnapshot};

const RULE_WIDTH: usize = 72;

/// Display one line per achievement followed by the refresh inputs
pub fn display_achievements(refresh: &AchievementRefresh) {
    println!("\nAchievements");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{:<22} {:<9} {:>9}  {:<10} {}",
        "KEY", "CATEGORY", "PROGRESS", "STATUS", "UNLOCKED"
    );
    println!("{}", "-".repeat(RULE_WIDTH));

    for snapshot in &refresh.snapshots {
        display_snapshot(snapshot);
    }

    let context = &refresh.diagnostics.context;
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("   Entries: {}", context.total_entries);
    println!("   Days logged: {}", context.unique_day_count);
    println!("   Current streak: {} days", context.current_streak);
    println!(
        "   Consistency: {:.0}%",
        context.consistency_score * 100.0
    );
    println!("   Goals achieved: {}", context.goals_achieved);

    if !refresh.newly_unlocked.is_empty() {
        println!("\nNewly unlocked: {}", refresh.newly_unlocked.join(", "));
    }
}

fn display_snapshot(snapshot: &AchievementSnapshot) {
    let status = if snapshot.is_unlocked() {
        "unlocked"
    } else if snapshot.requires_entitlement {
        "premium"
    } else {
        "locked"
    };
    let unlocked_at = snapshot
        .state
        .unlocked_at
        .map_or_else(String::new, |at| at.format("%Y-%m-%d").to_string());

    println!(
        "{:<22} {:<9} {:>8.0}%  {:<10} {}",
        snapshot.descriptor.key,
        format!("{:?}", snapshot.descriptor.category).to_lowercase(),
        snapshot.progress() * 100.0,
        status,
        unlocked_at
    );
}
