use std::{
    collections::HashMap,
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use textfx::{
    Action, BoundingBox, CharacterId, Color, ColorMappingCache, ColorPair, Coord, Direction, Ease,
    EffectCharacter, EngineConfig, Event, EventSource, Gradient, Grid, PathConfig, SceneConfig,
    SequenceEaser, SpanningAlgorithm, SyncMode, Waypoint,
};

#[derive(Parser, Debug)]
#[command(name = "textfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the arrival effect and print every frame as plain text.
    Play(PlayArgs),
    /// Print the order in which a spanning algorithm visits the text's cells.
    Order(OrderArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input text; read from stdin when omitted.
    #[arg(long)]
    text: Option<String>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames even if characters are still moving.
    #[arg(long, default_value_t = 500)]
    frames: usize,

    /// Gradient stops as RRGGBB hex.
    #[arg(long, value_delimiter = ',', default_value = "8A008A,00D1FF,FFFFFF")]
    stops: Vec<String>,

    /// Direction of the final gradient over the text.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Vertical)]
    direction: DirectionChoice,

    /// Order in which characters launch.
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::PrimsSimple)]
    algorithm: AlgorithmChoice,

    /// Ticks over which all characters launch.
    #[arg(long, default_value_t = 30)]
    launch_ticks: usize,
}

#[derive(Parser, Debug)]
struct OrderArgs {
    /// Input text; read from stdin when omitted.
    #[arg(long)]
    text: Option<String>,

    #[arg(long, value_enum, default_value_t = AlgorithmChoice::PrimsSimple)]
    algorithm: AlgorithmChoice,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

impl From<DirectionChoice> for Direction {
    fn from(d: DirectionChoice) -> Self {
        match d {
            DirectionChoice::Horizontal => Direction::Horizontal,
            DirectionChoice::Vertical => Direction::Vertical,
            DirectionChoice::Diagonal => Direction::Diagonal,
            DirectionChoice::Radial => Direction::Radial,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmChoice {
    PrimsSimple,
    PrimsWeighted,
    RecursiveBacktracker,
    BreadthFirst,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Order(args) => cmd_order(args),
    }
}

fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "read text from stdin")?;
            Ok(buf)
        }
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    EngineConfig::from_path(path).with_context(|| format!("load config '{}'", path.display()))
}

/// Non-space cells of `text`, top line at row 0.
fn text_cells(text: &str) -> Vec<(Coord, char)> {
    let mut cells = Vec::new();
    for (row, line) in text.lines().enumerate() {
        for (column, ch) in line.chars().enumerate() {
            if !ch.is_whitespace() {
                cells.push((Coord::new(row as i32, column as i32), ch));
            }
        }
    }
    cells
}

fn spanning_order(
    grid: &Grid,
    algorithm: AlgorithmChoice,
    seed: u64,
) -> anyhow::Result<Vec<Coord>> {
    let mut algo: Box<dyn SpanningAlgorithm> = match algorithm {
        AlgorithmChoice::PrimsSimple => Box::new(textfx::PrimsSimple::new(grid, None, seed)?),
        AlgorithmChoice::PrimsWeighted => Box::new(textfx::PrimsWeighted::new(grid, None, seed)?),
        AlgorithmChoice::RecursiveBacktracker => {
            Box::new(textfx::RecursiveBacktracker::new(grid, None, seed)?)
        }
        AlgorithmChoice::BreadthFirst => Box::new(textfx::BreadthFirst::new(grid, None, seed)?),
    };
    Ok(textfx::graph::spanning::node_order(algo.as_mut()))
}

fn cmd_order(args: OrderArgs) -> anyhow::Result<()> {
    let text = read_text(args.text)?;
    let cells = text_cells(&text);
    let grid = Grid::from_coords(cells.iter().map(|(c, _)| *c))?;
    let order = spanning_order(&grid, args.algorithm, args.seed)?;
    let out = std::io::stdout();
    let mut out = out.lock();
    for c in order {
        writeln!(out, "{} {}", c.row, c.column)?;
    }
    Ok(())
}

/// Build one character: it rises from `spawn_row` along a curve, trailing gradient symbols,
/// and settles on its input cell in the color `settled` picked for it.
fn provision(
    id: u32,
    symbol: char,
    coord: Coord,
    spawn_row: i32,
    trail: &Gradient,
    settled: Color,
    cfg: &EngineConfig,
) -> anyhow::Result<EffectCharacter> {
    let spawn = Coord::new(spawn_row, coord.column);
    let mut ch = EffectCharacter::with_config(CharacterId(id), symbol, spawn, cfg);

    let enter = ch.new_path(PathConfig::with_id("enter").speed(0.6).ease(Ease::OutQuad))?;
    let control = Coord::new((spawn_row + coord.row) / 2, coord.column + 4);
    ch.motion_mut()
        .path_mut(enter)
        .context("enter path missing")?
        .add_waypoint(Waypoint::new(coord).with_controls([control]).with_id("home"))?;

    let rise = ch.new_scene(SceneConfig::with_id("rise").sync(SyncMode::Distance))?;
    ch.animation_mut()
        .scene_mut(rise)
        .context("rise scene missing")?
        .apply_gradient_to_symbols(&['.', 'o', symbol], 1, Some(trail), None)?;

    let settle = ch.new_scene(SceneConfig::with_id("settle"))?;
    ch.animation_mut()
        .scene_mut(settle)
        .context("settle scene missing")?
        .add_frame(symbol, 1, ColorPair::fg(settled))?;

    ch.register_event(
        Event::PathActivated,
        EventSource::Path("enter".into()),
        Action::SetVisibility(true),
    )?;
    ch.register_event(
        Event::PathActivated,
        EventSource::Path("enter".into()),
        Action::ActivateScene("rise".into()),
    )?;
    ch.register_event(
        Event::PathComplete,
        EventSource::Path("enter".into()),
        Action::ActivateScene("settle".into()),
    )?;
    Ok(ch)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let text = read_text(args.text)?;
    let cells = text_cells(&text);
    let grid = Grid::from_coords(cells.iter().map(|(c, _)| *c))?;
    let text_bounds = grid.bounds();
    let spawn_row = text_bounds.max_row + 4;
    let canvas = BoundingBox::new(
        text_bounds.min_row,
        spawn_row,
        text_bounds.min_column,
        text_bounds.max_column + 4,
    )?;

    let stops = args
        .stops
        .iter()
        .map(|s| s.parse::<Color>())
        .collect::<Result<Vec<_>, _>>()?;
    let trail = Gradient::new(stops.iter().copied(), 8)?;
    let mut mapping_cache = ColorMappingCache::from_config(&cfg);
    let mapping = trail.build_coordinate_color_mapping(
        args.direction.into(),
        text_bounds,
        None,
        &mut mapping_cache,
    )?;

    let mut characters = Vec::with_capacity(cells.len());
    let mut by_coord = HashMap::with_capacity(cells.len());
    for (i, (coord, symbol)) in cells.iter().enumerate() {
        let settled = mapping
            .get(coord)
            .copied()
            .with_context(|| format!("no gradient color for {coord:?}"))?;
        let id = u32::try_from(i).context("too many characters")?;
        characters.push(provision(id, *symbol, *coord, spawn_row, &trail, settled, &cfg)?);
        by_coord.insert(*coord, i);
    }

    let order = spanning_order(&grid, args.algorithm, cfg.seed)?;
    let mut launcher = SequenceEaser::new(order, Ease::InOutSine, args.launch_ticks.max(1))?;

    let out = std::io::stdout();
    let mut out = out.lock();
    for _ in 0..args.frames {
        if !launcher.is_complete() {
            for c in launcher.step().added {
                if let Some(&i) = by_coord.get(c) {
                    characters[i].activate_path("enter")?;
                }
            }
        }
        for ch in &mut characters {
            ch.tick()?;
        }
        write_frame(&mut out, canvas, &characters)?;
        if launcher.is_complete() && characters.iter().all(|c| !c.is_active()) {
            break;
        }
    }
    Ok(())
}

fn write_frame(
    out: &mut impl std::io::Write,
    canvas: BoundingBox,
    characters: &[EffectCharacter],
) -> anyhow::Result<()> {
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let mut rows = vec![vec![(i32::MIN, ' '); width]; height];
    for ch in characters.iter().filter(|c| c.is_visible()) {
        let c = ch.current_coord();
        if !canvas.contains(c) {
            continue;
        }
        let (r, col) = (c.row - canvas.min_row, c.column - canvas.min_column);
        let cell = &mut rows[r as usize][col as usize];
        if ch.layer() < cell.0 {
            continue;
        }
        *cell = (ch.layer(), ch.current_visual().symbol);
    }
    for row in rows {
        let line: String = row.into_iter().map(|(_, g)| g).collect();
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out)?;
    Ok(())
}
