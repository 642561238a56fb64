mod args;

use std::error::Error;
use std::fs::File;

use args::{Args, Command};
use clap::Parser;
use log::info;
use ohana::{Engine, EngineConfig};
use rules::{Color, Game, Position};
use simplelog::{Config, SimpleLogger, WriteLogger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    match args.command {
        Command::Select { fen, moves } => select(fen, &moves, config).await,
        Command::Selfplay { fen, max_plies } => selfplay(fen, max_plies, config).await,
    }
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    match &args.log_file {
        Some(log_file) => WriteLogger::init(args.log_level(), Config::default(), File::create(log_file)?)?,
        None => SimpleLogger::init(args.log_level(), Config::default())?,
    }

    Ok(args)
}

fn load_game(fen: Option<String>) -> Result<Game, Box<dyn Error>> {
    Ok(match fen {
        Some(fen) => fen.parse()?,
        None => Game::new(),
    })
}

async fn select(fen: Option<String>, moves: &[String], config: EngineConfig) -> Result<(), Box<dyn Error>> {
    let mut game = load_game(fen)?;
    for mv in moves {
        game.play(mv)?;
    }

    if game.is_game_over() {
        println!("game over: {}", result(&game));
        return Ok(());
    }

    let mut engine = Engine::new(game, config);
    if let Some(mv) = engine.select_move().await {
        match engine.last_report() {
            Some(report) => println!("{} ({:?}, {} nodes)", mv, report.source, report.nodes),
            None => println!("{}", mv),
        }
    }

    Ok(())
}

async fn selfplay(fen: Option<String>, max_plies: u32, config: EngineConfig) -> Result<(), Box<dyn Error>> {
    let game = load_game(fen)?;
    let mut engine = Engine::new(game, config);

    for _ in 0..max_plies {
        if engine.position().is_game_over() {
            break;
        }

        let number = engine.position().fullmove_number();
        let mover = engine.position().side_to_move();
        let Some(mv) = engine.select_move().await else {
            break;
        };

        match mover {
            Color::White => println!("{}. {}", number, mv),
            Color::Black => println!("{}... {}", number, mv),
        }
    }

    info!("Final position {}", engine.position().fen());
    println!("{}", result(engine.position()));
    Ok(())
}

fn result(game: &Game) -> &'static str {
    if game.is_checkmate() {
        match game.side_to_move() {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if game.is_draw() {
        "1/2-1/2"
    } else {
        "*"
    }
}
