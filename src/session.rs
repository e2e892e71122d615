//! Line-oriented mission console: register obstacles and ask for advice.

use crate::algorithms::common::PathSearch;
use crate::error::{Result, SafePathError};
use crate::grid::Location;
use crate::map::ObstacleMap;
use crate::obstacle::{BottomlessPit, Camera, Fence, Guard, Sensor};
use crate::registry::ObstacleRegistry;
use log::debug;
use std::io::{BufRead, Write};

const MENU: &str = "Select one of the following options\n\
g) Add 'Guard' obstacle\n\
f) Add 'Fence' obstacle\n\
s) Add 'Sensor' obstacle\n\
c) Add 'Camera' obstacle\n\
b) Add 'Bottomless Pit' obstacle\n\
d) Show safe directions\n\
m) Display obstacle map\n\
p) Find safe path\n\
x) Exit\n\
Enter code:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddGuard,
    AddFence,
    AddSensor,
    AddCamera,
    AddBottomlessPit,
    SafeDirections,
    ShowMap,
    FindPath,
    Exit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        let mut chars = input.trim().chars();
        let code = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match code.to_ascii_lowercase() {
            'g' => Some(Command::AddGuard),
            'f' => Some(Command::AddFence),
            's' => Some(Command::AddSensor),
            'c' => Some(Command::AddCamera),
            'b' => Some(Command::AddBottomlessPit),
            'd' => Some(Command::SafeDirections),
            'm' => Some(Command::ShowMap),
            'p' => Some(Command::FindPath),
            'x' => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Parses `"X,Y"`, tolerating whitespace around either number.
pub fn parse_location(input: &str) -> Result<Location> {
    let invalid = || SafePathError::InvalidLocation(input.trim().to_string());
    let (x, y) = input.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Location::new(x, y))
}

pub fn parse_range(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| SafePathError::InvalidNumber(input.trim().to_string()))
}

/// A single direction code such as `n` or `E`.
pub fn parse_direction_code(input: &str) -> Result<char> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Ok(code),
        _ => Err(SafePathError::InvalidDirection {
            code: trimmed.chars().next().unwrap_or(' '),
        }),
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    registry: ObstacleRegistry,
    engine: Box<dyn PathSearch>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, engine: Box<dyn PathSearch>) -> Self {
        Session {
            input,
            output,
            registry: ObstacleRegistry::new(),
            engine,
        }
    }

    /// Starts the session with obstacles already known.
    pub fn with_registry(mut self, registry: ObstacleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `x` is entered or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Invalid option.")?;
                continue;
            };
            debug!("Menu command {:?}", command);
            if let Flow::Exit = self.execute(command)? {
                return Ok(());
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::AddGuard => {
                let Some(location) = self.prompt_location("Enter the guard's location (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                self.registry.add(Guard::new(location));
            }
            Command::AddFence => {
                let Some(start) =
                    self.prompt_location("Enter the location where the fence starts (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(end) =
                    self.prompt_location("Enter the location where the fence ends (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                self.registry.add(Fence::new(start, end));
            }
            Command::AddSensor => {
                let Some(location) = self.prompt_location("Enter the sensor's location (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(sensor) = self.prompt_sensor(location)? else {
                    return Ok(Flow::Exit);
                };
                self.registry.add(sensor);
            }
            Command::AddCamera => {
                let Some(location) = self.prompt_location("Enter the camera's location (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(camera) = self.prompt_camera(location)? else {
                    return Ok(Flow::Exit);
                };
                self.registry.add(camera);
            }
            Command::AddBottomlessPit => {
                let Some(location) = self.prompt_location(
                    "Each 'Bottomless Pit' has a size of 3x3. Enter the bottomless pit's centre location (X,Y):",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                self.registry.add(BottomlessPit::new(location));
            }
            Command::SafeDirections => {
                let Some(current) = self.prompt_location("Enter your current location (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                self.show_safe_directions(current)?;
            }
            Command::ShowMap => {
                let Some(top_left) = self
                    .prompt_location("Enter the location of the top-left cell of the map (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(bottom_right) = self.prompt_location(
                    "Enter the location of the bottom-right cell of the map (X,Y):",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                self.show_map(top_left, bottom_right)?;
            }
            Command::FindPath => {
                let Some(start) = self.prompt_location("Enter your current location (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(goal) =
                    self.prompt_location("Enter the location of your objective (X,Y):")?
                else {
                    return Ok(Flow::Exit);
                };
                self.show_path(start, goal)?;
            }
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn show_safe_directions(&mut self, current: Location) -> Result<()> {
        let directions = self.registry.safe_directions(current);
        if directions.is_empty() {
            writeln!(
                self.output,
                "You cannot safely move in any direction. Abort mission."
            )?;
        } else {
            let codes: String = directions.iter().map(|direction| direction.code()).collect();
            writeln!(
                self.output,
                "You can safely take any of the following directions: {}",
                codes
            )?;
        }
        Ok(())
    }

    fn show_map(&mut self, top_left: Location, bottom_right: Location) -> Result<()> {
        match ObstacleMap::render(&self.registry, top_left, bottom_right) {
            Ok(map) => write!(self.output, "{}", map)?,
            Err(SafePathError::InvalidRegion { .. }) => {
                writeln!(self.output, "Invalid map specification.")?
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn show_path(&mut self, start: Location, goal: Location) -> Result<()> {
        if start == goal {
            writeln!(self.output, "Agent, you are already at the objective.")?;
            return Ok(());
        }
        if !self.registry.is_safe(goal) {
            writeln!(
                self.output,
                "The objective is blocked by an obstacle and cannot be reached."
            )?;
            return Ok(());
        }

        match self
            .registry
            .find_safe_path(self.engine.as_mut(), start, goal)
        {
            Some(route) => {
                writeln!(
                    self.output,
                    "The following path will take you to the objective:"
                )?;
                writeln!(self.output, "{}", route)?;
            }
            None => {
                writeln!(self.output, "There is no safe path to the objective.")?;
                let stats = self.engine.last_stats();
                if stats.budget_exhausted {
                    writeln!(
                        self.output,
                        "(search stopped after exploring {} locations)",
                        stats.nodes_expanded
                    )?;
                }
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt_location(&mut self, prompt: &str) -> Result<Option<Location>> {
        writeln!(self.output, "{}", prompt)?;
        while let Some(line) = self.read_line()? {
            match parse_location(&line) {
                Ok(location) => return Ok(Some(location)),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "Invalid input.")?;
                }
            }
        }
        Ok(None)
    }

    fn prompt_sensor(&mut self, location: Location) -> Result<Option<Sensor>> {
        writeln!(self.output, "Enter the sensor's range (in klicks):")?;
        while let Some(line) = self.read_line()? {
            match parse_range(&line).and_then(|range| Sensor::new(location, range)) {
                Ok(sensor) => return Ok(Some(sensor)),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(
                        self.output,
                        "Invalid input. Please enter a valid positive number for the range."
                    )?;
                }
            }
        }
        Ok(None)
    }

    fn prompt_camera(&mut self, location: Location) -> Result<Option<Camera>> {
        writeln!(
            self.output,
            "Enter the direction the camera is facing (n, s, e, w):"
        )?;
        while let Some(line) = self.read_line()? {
            match parse_direction_code(&line).and_then(|code| Camera::from_code(location, code)) {
                Ok(camera) => return Ok(Some(camera)),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "Invalid direction. Please enter n, s, e, or w.")?;
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::a_star::AStar;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, ObstacleRegistry) {
        let mut session = Session::new(
            Cursor::new(script.to_string()),
            Vec::new(),
            Box::new(AStar::with_max_expansions(10_000)),
        );
        session.run().unwrap();
        let registry = session.registry().clone();
        let output = String::from_utf8(session.into_output()).unwrap();
        (output, registry)
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location("3,4\n").unwrap(), Location::new(3, 4));
        assert_eq!(parse_location(" -2 , 7 ").unwrap(), Location::new(-2, 7));
        assert!(matches!(
            parse_location("3;4"),
            Err(SafePathError::InvalidLocation(_))
        ));
        assert!(parse_location("3,four").is_err());
        assert!(parse_location("1,2,3").is_err());
    }

    #[test]
    fn test_parse_range_and_direction() {
        assert_eq!(parse_range(" 2.5\n").unwrap(), 2.5);
        assert!(matches!(
            parse_range("far"),
            Err(SafePathError::InvalidNumber(_))
        ));
        assert_eq!(parse_direction_code("E\n").unwrap(), 'E');
        assert!(parse_direction_code("ne").is_err());
        assert!(parse_direction_code("").is_err());
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("g\n"), Some(Command::AddGuard));
        assert_eq!(Command::parse("P"), Some(Command::FindPath));
        assert_eq!(Command::parse("gg"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_invalid_option_and_exit() {
        let (output, registry) = run_script("q\nx\n");
        assert!(output.contains("Invalid option."));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_obstacles_with_reprompts() {
        let script = "g\nnope\n1,1\n\
                      s\n0,0\n-3\n1.5\n\
                      c\n5,5\nq\nN\n\
                      f\n0,4\n3,4\n\
                      b\n9,9\nx\n";
        let (output, registry) = run_script(script);
        assert_eq!(registry.len(), 5);
        assert!(output.contains("Invalid input.\n"));
        assert!(output.contains("valid positive number"));
        assert!(output.contains("Invalid direction. Please enter n, s, e, or w."));
    }

    #[test]
    fn test_safe_directions() {
        let (output, _) = run_script("g\n0,-1\nd\n0,0\nb\n0,0\nd\n0,0\nx\n");
        assert!(output.contains("You can safely take any of the following directions: SEW"));
        assert!(output.contains("You cannot safely move in any direction. Abort mission."));
    }

    #[test]
    fn test_map_display() {
        let (output, _) = run_script("g\n1,0\nm\n0,0\n2,1\nm\n2,0\n0,0\nx\n");
        assert!(output.contains(".g.\n...\n"));
        assert!(output.contains("Invalid map specification."));
    }

    #[test]
    fn test_path_outcomes() {
        let script = "f\n1,-1\n1,1\n\
                      p\n0,0\n2,0\n\
                      p\n3,3\n3,3\n\
                      p\n0,0\n1,0\n\
                      x\n";
        let (output, _) = run_script(script);
        assert!(output.contains("The following path will take you to the objective:\n"));
        assert!(output.contains("Agent, you are already at the objective."));
        assert!(output.contains("The objective is blocked by an obstacle and cannot be reached."));
    }

    #[test]
    fn test_no_path_reports_budget() {
        let script = "g\n4,-1\ng\n4,1\ng\n3,0\ng\n5,0\np\n0,0\n4,0\nx\n";
        let (output, _) = run_script(script);
        assert!(output.contains("There is no safe path to the objective."));
        assert!(output.contains("search stopped after exploring 10000 locations"));
    }

    #[test]
    fn test_end_of_input_mid_prompt() {
        let (output, registry) = run_script("g\n");
        assert!(output.contains("Enter the guard's location (X,Y):"));
        assert!(registry.is_empty());
    }
}
