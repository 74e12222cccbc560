use log::warn;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::interface::{play_turn, TurnRequest};

#[derive(Serialize)]
struct ErrorReply {
    error: String,
}

/// Line-oriented driver: one JSON `TurnRequest` per input line, one JSON
/// `TurnReply` (or `{"error": ...}`) per output line. `quit` ends the loop.
pub struct Driver<R, W> {
    input: R,
    output: W,
    served: u64,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(input: R, output: W) -> Self { Self { input, output, served: 0 } }

    /// Requests answered successfully so far.
    pub fn served(&self) -> u64 { self.served }

    fn handle(&mut self, line: &str) -> io::Result<()> {
        let reply = serde_json::from_str::<TurnRequest>(line)
            .map_err(|e| format!("bad request: {e}"))
            .and_then(|req| play_turn(&req).map_err(|e| e.to_string()));
        let text = match reply {
            Ok(r) => {
                self.served += 1;
                serde_json::to_string(&r)
            }
            Err(error) => {
                warn!("{error}");
                serde_json::to_string(&ErrorReply { error })
            }
        }
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 { break; }
            let cmd = line.trim();
            if cmd.is_empty() { continue; }
            if cmd == "quit" { break; }
            let cmd = cmd.to_string();
            self.handle(&cmd)?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W { self.output }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardState, Dimensions};
    use crate::interface::TurnReply;
    use crate::search::Heuristic;

    #[test]
    fn answers_each_line_and_stops_at_quit() {
        let grid = BoardState::initial(Dimensions::standard(), Heuristic::Offensive2).to_grid();
        let req = serde_json::json!({ "grid": grid, "side": "onyx", "depth": 2, "heuristic": 3, "seed": 5 });
        let input = format!("{req}\n\nnot json\n{{\"grid\": [], \"side\": \"onyx\", \"depth\": 2, \"heuristic\": 9}}\nquit\n{req}\n");
        let mut driver = Driver::new(input.as_bytes(), Vec::new());
        driver.run_loop().unwrap();
        assert_eq!(driver.served(), 1);
        let out = String::from_utf8(driver.into_output()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "unexpected output: {out}");
        let reply: TurnReply = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(reply.remaining, 16);
        assert!(reply.nodes > 0);
        assert!(lines[1].contains("bad request"));
        assert!(lines[2].contains("unknown heuristic id 9"));
    }
}
