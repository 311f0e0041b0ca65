//! REST subcommands: fetch from the public API and print.

use anyhow::Result;

use switchcraft_api::{ApiClient, DeathsEntry, PlaytimeLeaderboard, SupporterGoal};

use crate::terminal_output::{
    note_info, note_success, note_warn, paint, render_table, Column, BOLD, DIM,
};

pub async fn players(client: &ApiClient) -> Result<()> {
    let counts = client.player_counts().await?;
    note_info(&format!(
        "There are {} players online, {} of which are active.",
        paint(BOLD, &counts.total.to_string()),
        counts.active
    ));
    if !counts.is_consistent() {
        note_warn("API reported more active players than online players");
    }
    Ok(())
}

pub async fn tps(client: &ApiClient) -> Result<()> {
    let stats = client.tps().await?;
    note_info(&format!("{} TPS", paint(BOLD, &format!("{:.2}", stats.tps))));
    println!("  average tick: {:.2} ms", stats.avg_ms_per_tick);
    println!("  last tick:    {:.2} ms", stats.last_ms_per_tick);
    Ok(())
}

pub async fn playtime(client: &ApiClient, limit: usize) -> Result<()> {
    let board = client.playtime_leaderboard().await?;
    print!("{}", playtime_table(&board, limit));
    Ok(())
}

pub async fn supporter(client: &ApiClient) -> Result<()> {
    let goal = client.supporter_goal().await?;
    print_supporter(&goal);
    Ok(())
}

pub async fn deaths(client: &ApiClient, limit: usize) -> Result<()> {
    let entries = client.deaths_leaderboard().await?;
    print!("{}", deaths_table(&entries, limit));
    Ok(())
}

pub async fn proxies(client: &ApiClient) -> Result<()> {
    let ranges = client.proxy_ranges().await?;
    note_info(&format!("{} proxy ranges", ranges.len()));
    for range in ranges {
        println!("  {range}");
    }
    Ok(())
}

fn playtime_table(board: &PlaytimeLeaderboard, limit: usize) -> String {
    let rows: Vec<Vec<String>> = board
        .entries
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, e)| vec![format!("#{}", i + 1), e.name.clone(), format_hours(e.seconds)])
        .collect();
    let mut out = render_table(&[Column::right("Rank"), Column::left("Player"), Column::right("Hours")], &rows);
    out.push_str(&paint(DIM, &format!("  updated {}\n", board.updated_at.to_rfc3339())));
    out
}

fn deaths_table(entries: &[DeathsEntry], limit: usize) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, e)| vec![format!("#{}", i + 1), e.name.clone(), e.count.to_string()])
        .collect();
    render_table(&[Column::right("Rank"), Column::left("Player"), Column::right("Deaths")], &rows)
}

fn print_supporter(goal: &SupporterGoal) {
    let line = format!("{:.2} / {:.2} ({:.0}%)", goal.current, goal.goal, goal.progress());
    if goal.goal_met {
        note_success(&format!("Supporter goal met: {line}"));
    } else {
        note_info(&format!("Supporter goal: {line}"));
    }
    if !goal.is_consistent() {
        note_warn("goalMet flag disagrees with the amounts");
    }
    if let Some(url) = &goal.supporter_url {
        println!("  {url}");
    }
}

fn format_hours(seconds: u64) -> String {
    format!("{:.1}", seconds as f64 / 3600.0)
}
