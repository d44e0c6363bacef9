use crate::bet::{validate_stake, Bet, BetKind};
use crate::config::{quick_bet, Settings, MAXIMUM_BET, MINIMUM_BET, QUICK_BETS};
use crate::format;
use crate::roulette::Wheel;
use crate::session::Session;
use crate::settlement;
use crate::storage::{self, Leaderboard, LeaderboardEntry};
use crate::strategy::{self, Strategy, STRATEGY_NAMES};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_HOT: usize = 5;
const DEFAULT_HISTORY: usize = 10;
const MAX_AUTO_ROUNDS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Bet { kind: BetKind, stake: Option<u64> },
    Strategy { name: Option<String>, base: Option<u64> },
    Auto { rounds: u32, kind: BetKind },
    Calc { kind: BetKind, stake: u64 },
    Compare { stake: u64 },
    Stats,
    Hot(usize),
    History(usize),
    Balance,
    Achievements,
    Save,
    Load,
    Delete,
    Export(Option<PathBuf>),
    Leaderboard,
    Quit,
}

fn help_text() -> String {
    let quick: Vec<String> = QUICK_BETS
        .iter()
        .map(|(key, amount)| format!("{key}=${amount}"))
        .collect();
    format!(
        "commands:\n\
         \x20 bet <kind> [value] [amount]   kinds: number N, red, black, odd, even, high, low, dozen 1-3\n\
         \x20 strategy <{}|none> [base]\n\
         \x20 auto <rounds> <kind> [value]  play rounds with the active strategy\n\
         \x20 calc <kind> [value] <amount>  potential payout\n\
         \x20 compare <amount>              compare bet types\n\
         \x20 stats | hot [n] | history [n] | balance | achievements\n\
         \x20 save | load | delete | export [file] | leaderboard\n\
         \x20 help | quit\n\
         bets: ${MINIMUM_BET}-${MAXIMUM_BET}, quick amounts: {}",
        STRATEGY_NAMES.join("|"),
        quick.join(" ")
    )
}

fn parse_stake(token: &str) -> Result<u64> {
    quick_bet(token)
        .or_else(|| token.parse().ok())
        .ok_or_else(|| anyhow!("invalid bet amount '{token}'"))
}

fn parse_count(token: Option<&&str>, default: usize) -> Result<usize> {
    match token {
        Some(t) => t.parse().with_context(|| format!("invalid count '{t}'")),
        None => Ok(default),
    }
}

/// Split `<kind> [value] rest...` into a bet kind and the remaining tokens.
fn parse_kind<'a>(args: &'a [&'a str]) -> Result<(BetKind, &'a [&'a str])> {
    let (kind, rest) = args
        .split_first()
        .ok_or_else(|| anyhow!("missing bet kind"))?;
    if BetKind::takes_qualifier(kind) {
        let (value, rest) = rest
            .split_first()
            .ok_or_else(|| anyhow!("bet kind '{kind}' needs a value"))?;
        Ok((BetKind::parse(kind, Some(value))?, rest))
    } else {
        Ok((BetKind::parse(kind, None)?, rest))
    }
}

impl Command {
    /// Parse one input line. Blank lines give `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = parts.split_first() else {
            return Ok(None);
        };
        let command = match name.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "bet" | "b" => {
                let (kind, rest) = parse_kind(args)?;
                let stake = rest.first().map(|t| parse_stake(t)).transpose()?;
                Command::Bet { kind, stake }
            }
            "strategy" => {
                let name = args.first().ok_or_else(|| anyhow!("usage: strategy <name|none> [base]"))?;
                let base = args.get(1).map(|t| parse_stake(t)).transpose()?;
                let name = (!name.eq_ignore_ascii_case("none")).then(|| name.to_string());
                Command::Strategy { name, base }
            }
            "auto" => {
                let (rounds, rest) = args
                    .split_first()
                    .ok_or_else(|| anyhow!("usage: auto <rounds> <kind> [value]"))?;
                let rounds: u32 = rounds
                    .parse()
                    .with_context(|| format!("invalid round count '{rounds}'"))?;
                if rounds == 0 || rounds > MAX_AUTO_ROUNDS {
                    bail!("rounds must be between 1 and {MAX_AUTO_ROUNDS}");
                }
                let (kind, _) = parse_kind(rest)?;
                Command::Auto { rounds, kind }
            }
            "calc" => {
                let (kind, rest) = parse_kind(args)?;
                let stake = rest
                    .first()
                    .ok_or_else(|| anyhow!("usage: calc <kind> [value] <amount>"))
                    .and_then(|t| parse_stake(t))?;
                let stake = validate_stake(stake)?;
                Command::Calc { kind, stake }
            }
            "compare" => {
                let stake = args
                    .first()
                    .ok_or_else(|| anyhow!("usage: compare <amount>"))
                    .and_then(|t| parse_stake(t))?;
                let stake = validate_stake(stake)?;
                Command::Compare { stake }
            }
            "stats" => Command::Stats,
            "hot" => Command::Hot(parse_count(args.first(), DEFAULT_HOT)?),
            "history" => Command::History(parse_count(args.first(), DEFAULT_HISTORY)?),
            "balance" => Command::Balance,
            "achievements" => Command::Achievements,
            "save" => Command::Save,
            "load" => Command::Load,
            "delete" => Command::Delete,
            "export" => Command::Export(args.first().map(PathBuf::from)),
            "leaderboard" => Command::Leaderboard,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{other}', type 'help'"),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub quit: bool,
}

impl Response {
    fn text(text: impl Into<String>) -> Self {
        Response {
            text: text.into(),
            quit: false,
        }
    }
}

/// Game shell: one session, one wheel, an optional strategy.
pub struct Game {
    session: Session,
    wheel: Wheel,
    strategy: Option<Box<dyn Strategy>>,
    settings: Settings,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let wheel = match settings.seed {
            Some(seed) => Wheel::seeded(seed),
            None => Wheel::from_entropy(),
        };
        Game {
            session: Session::default(),
            wheel,
            strategy: None,
            settings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn export_path(&self) -> PathBuf {
        self.settings.save_file.with_file_name("roulette_history.json")
    }

    fn play(&mut self, bet: Bet) -> Result<String> {
        let result = self.session.play_round(bet, &mut self.wheel)?;
        if let Some(strategy) = self.strategy.as_mut() {
            if result.outcome.won {
                strategy.on_win();
            } else {
                strategy.on_loss();
            }
        }
        let mut text = format::round(&result);
        if let Some(warning) = self.session.balance_warning() {
            text.push('\n');
            text.push_str(format::warning(warning));
        }
        if !self.session.can_play() {
            text.push_str("\nyour balance is below the minimum bet, game over");
        }
        Ok(text)
    }

    fn bet(&mut self, kind: BetKind, stake: Option<u64>) -> Result<String> {
        let stake = match (stake, self.strategy.as_ref()) {
            (Some(stake), _) => stake,
            (None, Some(strategy)) => strategy.bet_amount(),
            (None, None) => bail!("no amount given and no strategy selected"),
        };
        let bet = Bet::new(kind, stake)?;
        self.session.check_affordable(bet.stake())?;
        let summary = format::bet_summary(&bet);
        Ok(format!("{summary}\n{}", self.play(bet)?))
    }

    fn auto(&mut self, rounds: u32, kind: BetKind) -> Result<String> {
        let mut lines = Vec::new();
        for round in 1..=rounds {
            let stake = self
                .strategy
                .as_ref()
                .map(|s| s.bet_amount())
                .ok_or_else(|| anyhow!("select a strategy first"))?;
            let played = Bet::new(kind, stake)
                .map_err(anyhow::Error::from)
                .and_then(|bet| self.play(bet));
            match played {
                Ok(text) => lines.push(format!("round {round}: {}", text.replace('\n', " | "))),
                Err(e) => {
                    lines.push(format!("stopped at round {round}: {e}"));
                    break;
                }
            }
        }
        lines.push(format::statistics(&self.session.statistics()));
        Ok(lines.join("\n"))
    }

    async fn quit(&mut self) -> String {
        let mut lines = Vec::new();
        if self.session.statistics().total_bets > 0 {
            let entry = LeaderboardEntry::from_session(&self.settings.name, &self.session);
            match storage::submit_to_leaderboard(&self.settings.leaderboard_file, entry).await {
                Ok(_) => lines.push("result added to leaderboard".to_string()),
                Err(e) => lines.push(format!("error saving to leaderboard: {e}")),
            }
        }
        lines.push(self.autosave().await);
        lines.push(format::statistics(&self.session.statistics()));
        lines.push("thanks for playing!".to_string());
        lines.join("\n")
    }

    /// Best-effort save on the way out.
    pub async fn autosave(&self) -> String {
        match storage::save_session(&self.settings.save_file, &self.session).await {
            Ok(()) => "game saved".to_string(),
            Err(e) => {
                warn!("autosave failed: {e}");
                format!("error saving game: {e}")
            }
        }
    }

    pub async fn load(&mut self) -> Result<String> {
        match storage::load_session(&self.settings.save_file).await {
            Ok(Some(session)) => {
                self.session = session;
                Ok(format!(
                    "game loaded, balance: {}",
                    format::currency(self.session.balance())
                ))
            }
            Ok(None) => Ok("no saved game found".to_string()),
            Err(e) => Ok(format!("error loading game: {e}")),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Response> {
        debug!("executing {command:?}");
        let text = match command {
            Command::Help => help_text(),
            Command::Bet { kind, stake } => self.bet(kind, stake)?,
            Command::Strategy { name: None, .. } => {
                self.strategy = None;
                "strategy cleared, manual betting".to_string()
            }
            Command::Strategy { name: Some(name), base } => {
                let strategy = strategy::from_name(&name, base)?;
                let text = format!(
                    "{} strategy active, next bet {}",
                    strategy.name(),
                    format::currency(strategy.bet_amount())
                );
                self.strategy = Some(strategy);
                text
            }
            Command::Auto { rounds, kind } => self.auto(rounds, kind)?,
            Command::Calc { kind, stake } => {
                format::preview(&kind.to_string(), &settlement::preview(kind.name(), stake))
            }
            Command::Compare { stake } => format::comparison(stake),
            Command::Stats => format::statistics(&self.session.statistics()),
            Command::Hot(count) => format::hot_numbers(&self.session.hot_numbers(count)),
            Command::History(count) => format::history(self.session.recent(count)),
            Command::Balance => format!("balance: {}", format::currency(self.session.balance())),
            Command::Achievements => format::achievements(&self.session),
            Command::Save => match storage::save_session(&self.settings.save_file, &self.session).await {
                Ok(()) => "game saved".to_string(),
                Err(e) => format!("error saving game: {e}"),
            },
            Command::Load => self.load().await?,
            Command::Delete => match storage::delete_save(&self.settings.save_file).await {
                Ok(true) => "save deleted".to_string(),
                Ok(false) => "no save to delete".to_string(),
                Err(e) => format!("error deleting save: {e}"),
            },
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_path());
                match storage::export_history(&path, &self.settings.name, &self.session).await {
                    Ok(()) => format!("history exported to {}", path.display()),
                    Err(e) => format!("error exporting history: {e}"),
                }
            }
            Command::Leaderboard => {
                format::leaderboard(&Leaderboard::load(&self.settings.leaderboard_file).await)
            }
            Command::Quit => {
                return Ok(Response {
                    text: self.quit().await,
                    quit: true,
                })
            }
        };
        Ok(Response::text(text))
    }
}

/// Run the interactive loop on stdin until `quit` or end of input.
pub async fn start(settings: Settings) -> Result<()> {
    let resume = settings.resume;
    let mut game = Game::new(settings);
    println!("welcome to roulette!");
    if resume {
        println!("{}", game.load().await?);
    }
    println!("balance: {}. type 'help' for commands.", format::currency(game.session().balance()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                println!("{}", game.autosave().await);
                break;
            }
            Err(e) => {
                println!("{}", game.autosave().await);
                return Err(e).context("reading input");
            }
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };
        match game.execute(command).await {
            Ok(response) => {
                println!("{}", response.text);
                if response.quit {
                    break;
                }
            }
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}
