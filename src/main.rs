use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use onyxbreak::arena::{self, GameReport};
use onyxbreak::board::{BoardState, Dimensions, GoalRule, Rules, Side};
use onyxbreak::protocol::Driver;
use onyxbreak::search::{Algorithm, EvalWeights, Heuristic, SearchParams};
use std::io;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Engine against engine
    Play,
    /// Answer JSON turn requests on stdin
    Serve,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    Standard,
    Wide,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Weights {
    Enhanced,
    Classic,
    None,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Breakthrough engine: self-play and turn server", long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    #[arg(long, value_enum, default_value = "minimax")]
    onyx_search: Algorithm,
    #[arg(long, value_enum, default_value = "offensive1")]
    onyx_heuristic: Heuristic,
    #[arg(long, default_value_t = 3)]
    onyx_depth: u32,

    #[arg(long, value_enum, default_value = "alpha-beta")]
    crystal_search: Algorithm,
    #[arg(long, value_enum, default_value = "offensive1")]
    crystal_heuristic: Heuristic,
    #[arg(long, default_value_t = 4)]
    crystal_depth: u32,

    #[arg(long, value_enum, default_value = "standard")]
    variant: Variant,

    /// Only diagonal steps capture
    #[arg(long)]
    classic_rules: bool,

    /// Three pieces home (or opponent down to two) wins
    #[arg(long)]
    three_home: bool,

    #[arg(long, value_enum, default_value = "enhanced")]
    weights: Weights,

    /// Root-split threads per search
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Disable the endgame depth extension
    #[arg(long)]
    no_adaptive: bool,

    /// Seed for tie-break noise; game g uses seed + g
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a game after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,

    /// Emit one JSON report per game instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn params(&self, algorithm: Algorithm, heuristic: Heuristic, depth: u32, game: usize) -> SearchParams {
        SearchParams {
            depth,
            algorithm,
            heuristic,
            threads: self.threads,
            adaptive_depth: !self.no_adaptive,
            seed: self.seed.map(|s| s.wrapping_add(game as u64)),
            weights: match self.weights {
                Weights::Enhanced => EvalWeights::default(),
                Weights::Classic => EvalWeights::classic(),
                Weights::None => EvalWeights::none(),
            },
            ..SearchParams::default()
        }
    }

    fn start(&self) -> BoardState {
        let dims = match self.variant {
            Variant::Standard => Dimensions::standard(),
            Variant::Wide => Dimensions::wide(),
        };
        let rules = Rules {
            goal: if self.three_home { GoalRule::ThreeHome } else { GoalRule::Edge },
            straight_captures: !self.classic_rules,
        };
        BoardState::initial(dims, self.onyx_heuristic).with_rules(rules)
    }
}

fn print_report(game: usize, report: &GameReport) {
    match report.winner {
        Some(w) => println!("\nGame {}: {:?} wins after {} plies", game + 1, w, report.plies),
        None => println!("\nGame {}: no result after {} plies", game + 1, report.plies),
    }
    for side in Side::BOTH {
        let s = report.stats(side);
        println!(
            "{:?}: turns {} nodes {} (avg {:.1}/move) time {:.3}s (avg {:.4}s/move) captured {}",
            side,
            s.turns,
            s.nodes,
            s.avg_nodes(),
            s.seconds,
            s.avg_seconds(),
            s.captured
        );
    }
}

fn play(args: &Args) -> Result<()> {
    let bar = if args.games > 1 && !args.json {
        let pb = ProgressBar::new(args.games as u64);
        pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
        Some(pb)
    } else {
        None
    };

    let mut wins = [0usize; 2];
    for g in 0..args.games {
        let onyx = args.params(args.onyx_search, args.onyx_heuristic, args.onyx_depth, g);
        let crystal = args.params(args.crystal_search, args.crystal_heuristic, args.crystal_depth, g);
        let verbose = args.verbose;
        let report = arena::play_game_with(onyx, crystal, args.start(), args.max_plies, |_, d| {
            if verbose { println!("\n{} -> nodes {}\n{}", d.chosen, d.nodes, d.state); }
        })?;
        match report.winner {
            Some(Side::Onyx) => wins[0] += 1,
            Some(Side::Crystal) => wins[1] += 1,
            None => {}
        }
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else if let Some(pb) = &bar {
            pb.set_message(format!("onyx {} crystal {}", wins[0], wins[1]));
            pb.inc(1);
        } else {
            print_report(g, &report);
        }
    }
    if let Some(pb) = bar {
        pb.finish();
        println!("Onyx wins: {}  Crystal wins: {}  Unfinished: {}", wins[0], wins[1], args.games - wins[0] - wins[1]);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.games == 0 { anyhow::bail!("--games must be at least 1"); }

    match args.mode {
        Mode::Play => play(&args),
        Mode::Serve => {
            let stdin = io::stdin();
            let mut driver = Driver::new(stdin.lock(), io::stdout());
            driver.run_loop()?;
            Ok(())
        }
    }
}
