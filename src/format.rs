use crate::achievements::Achievement;
use crate::bet::Bet;
use crate::session::{BalanceWarning, BetRecord, RoundResult, Session, Statistics};
use crate::settlement::{compare_bet_types, potential_payout, PayoutPreview};
use crate::storage::Leaderboard;
use std::fmt::Write;

pub fn separator() -> String {
    "-".repeat(50)
}

pub fn currency(amount: u64) -> String {
    format!("${amount}")
}

pub fn percentage(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn profit_loss(profit: i64) -> String {
    if profit >= 0 {
        format!("+${profit}")
    } else {
        format!("-${}", profit.unsigned_abs())
    }
}

pub fn bet_summary(bet: &Bet) -> String {
    format!(
        "{sep}\nbet summary:\ntype: {bet}\npotential payout: {}\n{sep}",
        currency(potential_payout(bet)),
        sep = separator()
    )
}

pub fn round(result: &RoundResult) -> String {
    let mut out = format!(
        "the ball lands on {} {}\n",
        result.winning_number, result.color
    );
    if result.outcome.won {
        let _ = writeln!(out, "you win {}!", currency(result.outcome.payout));
    } else {
        let _ = writeln!(out, "you lose {}", currency(result.bet.stake()));
    }
    let _ = write!(out, "balance: {}", currency(result.balance));
    for achievement in &result.unlocked {
        let _ = write!(out, "\nachievement unlocked: {}", achievement.name());
    }
    out
}

pub fn warning(warning: BalanceWarning) -> &'static str {
    match warning {
        BalanceWarning::Critical => "critical: your balance is almost gone",
        BalanceWarning::Low => "warning: your balance is running low",
    }
}

pub fn statistics(stats: &Statistics) -> String {
    let sep = separator();
    format!(
        "{sep}\nstatistics:\n{sep}\n\
         balance: {}\n\
         profit: {}\n\
         bets: {} (wins {}, losses {})\n\
         win rate: {}\n\
         streak: {} wins / {} losses (best {} / worst {})\n{sep}",
        currency(stats.balance),
        profit_loss(stats.profit),
        stats.total_bets,
        stats.wins,
        stats.losses,
        percentage(stats.win_rate),
        stats.current_win_streak,
        stats.current_loss_streak,
        stats.max_win_streak,
        stats.max_loss_streak,
    )
}

pub fn hot_numbers(numbers: &[(u8, u64)]) -> String {
    if numbers.is_empty() {
        return "no spins yet".to_string();
    }
    let list: Vec<String> = numbers
        .iter()
        .map(|(number, hits)| format!("{number} ({hits}x)"))
        .collect();
    format!("hot numbers: {}", list.join(", "))
}

pub fn history(records: &[BetRecord]) -> String {
    if records.is_empty() {
        return "no bets yet".to_string();
    }
    records
        .iter()
        .map(|r| {
            let result = if r.won {
                format!("won {}", currency(r.payout))
            } else {
                "lost".to_string()
            };
            format!("{} -> {} | {}", r.bet, r.winning_number, result)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn preview(label: &str, preview: &PayoutPreview) -> String {
    let sep = separator();
    format!(
        "{sep}\ncalculation results:\n{sep}\n\
         bet amount: {}\nbet type: {label}\npotential payout: {}\n\
         potential profit: {}\nroi: {}\n{sep}",
        currency(preview.stake),
        currency(preview.payout),
        profit_loss(preview.profit),
        percentage(preview.roi),
    )
}

pub fn comparison(stake: u64) -> String {
    let sep = separator();
    let mut out = format!(
        "{sep}\nbet type comparison (bet amount: {})\n{sep}\n{:<15} {:<12} {:<12} {:<12} {:<10}\n{}\n",
        currency(stake),
        "bet type",
        "multiplier",
        "payout",
        "profit",
        "roi",
        "-".repeat(60)
    );
    for (label, row) in compare_bet_types(stake) {
        let _ = writeln!(
            out,
            "{:<15} {:<12} {:<12} {:<12} {}",
            label,
            format!("{}x", row.multiplier),
            currency(row.payout),
            profit_loss(row.profit),
            percentage(row.roi)
        );
    }
    out.push_str(&sep);
    out
}

pub fn achievements(session: &Session) -> String {
    let sep = separator();
    let unlocked = session.achievements();
    let mut out = format!(
        "{sep}\nachievements:\n{sep}\nunlocked: {}/{}\n",
        unlocked.len(),
        Achievement::ALL.len()
    );
    for achievement in Achievement::ALL {
        let mark = if unlocked.contains(&achievement) { "✓" } else { "✗" };
        let _ = writeln!(out, "{mark} {}: {}", achievement.name(), achievement.description());
    }
    out.push_str(&sep);
    out
}

pub fn leaderboard(board: &Leaderboard) -> String {
    if board.entries().is_empty() {
        return "no leaderboard entries yet".to_string();
    }
    let sep = separator();
    let mut out = format!("{sep}\ntop 10 leaderboard:\n{sep}\n");
    for (i, entry) in board.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - balance: {} | profit: {} | bets: {} | win rate: {}",
            i + 1,
            entry.name,
            currency(entry.final_balance),
            profit_loss(entry.profit),
            entry.total_bets,
            percentage(entry.win_rate)
        );
    }
    out.push_str(&sep);
    out
}
