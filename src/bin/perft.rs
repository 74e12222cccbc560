use onyxbreak::board::{BoardState, Dimensions, Rules};
use onyxbreak::perft::{perft, perft_split};
use onyxbreak::search::Heuristic;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for onyxbreak")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    #[arg(long, default_value_t = 8)]
    width: usize,
    #[arg(long, default_value_t = 8)]
    height: usize,
    /// Only diagonal steps capture
    #[arg(long, default_value_t = false)]
    classic_rules: bool,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;
    let rules = if args.classic_rules { Rules::classic() } else { Rules::default() };
    let base = BoardState::initial(Dimensions::new(args.width, args.height)?, Heuristic::Offensive2).with_rules(rules);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| -> anyhow::Result<(u64, f64)> {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&base, depth)? } else { perft_split(&base, depth)? };
        Ok((nodes, t0.elapsed().as_secs_f64()))
    })?;

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
