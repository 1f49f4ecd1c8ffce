//! Chess Opponent CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use chess_opponent::{
    difficulties_help, evaluate_position, get_legal_moves_from_fen, run_match, ChessGame,
    Difficulty, Engine, EngineConfig, EngineError, GameStatistics, RulesEngine, ScoredMove,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chess-opponent")]
#[command(about = "Chess opponent move-decision engine", long_about = None)]
struct Cli {
    /// 引擎配置文件（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 随机种子（覆盖配置文件）
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,
    },

    /// 选择一步棋
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 难度等级 (1-5 或名称)
        #[arg(long, default_value = "3")]
        level: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（白方视角）
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 走法提示
    Hint {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 返回的走法数量
        #[arg(long, default_value = "3")]
        n: usize,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 两个难度等级对战
    Match {
        /// 第一局执白的等级
        #[arg(long)]
        white: String,

        /// 第一局执黑的等级
        #[arg(long)]
        black: String,

        /// 对局数
        #[arg(long, default_value = "10")]
        games: usize,

        /// 每局最大步数
        #[arg(long, default_value = "200")]
        max_plies: usize,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct BestResponse {
    #[serde(rename = "move")]
    mv: Option<String>,
    level: Difficulty,
    elapsed_ms: f64,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    n: Option<usize>,
}

#[derive(Serialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hints: Option<Vec<ScoredMove>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<GameStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_decision_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    fn success_move(mv: Option<String>, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            mv,
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_stats(stats: GameStatistics) -> Self {
        Self {
            ok: true,
            average_decision_ms: Some(stats.average_decision_time()),
            stats: Some(stats),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn exit_with(e: EngineError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"{}\"}}", e))
}

fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> Result<EngineConfig, EngineError> {
    let mut config = match path {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn parse_level(level: &str) -> Difficulty {
    level.parse().unwrap_or_else(|e| {
        eprintln!("Error: {} (levels: {})", e, difficulties_help());
        std::process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref(), cli.seed).unwrap_or_else(|e| exit_with(e));

    match cli.command {
        Commands::Moves { fen } => match get_legal_moves_from_fen(&fen) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Best { fen, level, json } => {
            let level = parse_level(&level);
            let mut engine = Engine::new(config).unwrap_or_else(|e| exit_with(e));
            let mut game = ChessGame::from_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let decision = engine
                .select_move(&mut game, level)
                .unwrap_or_else(|e| exit_with(e));

            let notation = decision.mv.map(|m| m.notation);
            if json {
                let response = BestResponse {
                    mv: notation,
                    level,
                    elapsed_ms: decision.elapsed_ms,
                };
                println!("{}", to_json(&response));
            } else {
                match notation {
                    Some(mv) => println!("Best move (level={}): {}", level, mv),
                    None => println!("No legal move ({:?})", game.game_result()),
                }
                println!("Time: {:.2}ms", decision.elapsed_ms);
            }
        }

        Commands::Score { fen, json } => {
            let game = ChessGame::from_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let score = evaluate_position(&game);
            if json {
                println!("{{\"fen\": {:?}, \"score\": {}}}", fen, score);
            } else {
                println!("局面评估 (白方视角): {}", score);
            }
        }

        Commands::Hint { fen, n, json } => {
            let engine = Engine::new(config).unwrap_or_else(|e| exit_with(e));
            let game = ChessGame::from_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let hints = engine.suggest_moves(&game, n);
            if json {
                println!("{}", to_json(&hints));
            } else {
                println!("Hints ({}):", hints.len());
                for hint in &hints {
                    println!("  {} (score: {})", hint.mv, hint.score);
                }
            }
        }

        Commands::Match {
            white,
            black,
            games,
            max_plies,
        } => {
            let white = parse_level(&white);
            let black = parse_level(&black);
            let summary = run_match(&config, white, black, games, max_plies)
                .unwrap_or_else(|e| exit_with(e));
            println!(
                "{} vs {}: +{} -{} ={} (score {:.1}%, {} adjudicated)",
                white,
                black,
                summary.first_wins,
                summary.second_wins,
                summary.draws,
                summary.first_score() * 100.0,
                summary.adjudicated
            );
        }

        Commands::Server => {
            let engine = Engine::new(config).unwrap_or_else(|e| exit_with(e));
            run_server(engine);
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server(mut engine: Engine) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response));
                let _ = stdout.flush();
                continue;
            }
        };

        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&mut engine, &request),
            "moves" => handle_moves_request(&request),
            "eval" => handle_eval_request(&request),
            "hint" => handle_hint_request(&engine, &request),
            "stats" => ServerResponse::success_stats(engine.statistics()),
            "reset" => {
                engine.reset_statistics();
                ServerResponse::success()
            }
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        println!("{}", to_json(&response));
        let _ = stdout.flush();
    }
}

/// 处理 best 命令，选出的走法计入本次会话的统计
fn handle_best_request(engine: &mut Engine, request: &ServerRequest) -> ServerResponse {
    let level = match request.level.as_deref().unwrap_or("3").parse::<Difficulty>() {
        Ok(l) => l,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };
    let mut game = match ChessGame::from_fen(&request.fen) {
        Ok(g) => g,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };

    let decision = match engine.select_move(&mut game, level) {
        Ok(d) => d,
        Err(e) => return ServerResponse::error(&format!("AI error: {}", e)),
    };
    let mv = match decision.mv {
        Some(mv) => mv,
        None => return ServerResponse::success_move(None, decision.elapsed_ms),
    };

    if let Err(e) = game.apply_move(&mv) {
        return ServerResponse::error(&format!("AI error: {}", e));
    }
    engine.record_move(&mv, decision.elapsed_ms, game.is_check());
    ServerResponse::success_move(Some(mv.notation), decision.elapsed_ms)
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_fen(&request.fen) {
        Ok(moves) => ServerResponse {
            ok: true,
            legal_moves: Some(moves),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match ChessGame::from_fen(&request.fen) {
        Ok(game) => ServerResponse {
            ok: true,
            eval: Some(evaluate_position(&game)),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 hint 命令
fn handle_hint_request(engine: &Engine, request: &ServerRequest) -> ServerResponse {
    match ChessGame::from_fen(&request.fen) {
        Ok(game) => ServerResponse {
            ok: true,
            hints: Some(engine.suggest_moves(&game, request.n.unwrap_or(3))),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}
