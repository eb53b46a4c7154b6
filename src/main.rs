use implicit_treap::treap::{self, ImplicitTreap};
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::env;
use std::io::{self, BufRead};
use std::num::ParseIntError;
use std::process;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Eq, PartialEq)]
enum Command {
    Insert(usize, i64),
    Erase(usize, usize),
    Sum(usize, usize),
    Size,
    Print,
    Quit,
}

#[derive(Debug, Error)]
enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` expects {1} arguments")]
    Arity(String, &'static str),
    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),
    #[error(transparent)]
    Treap(#[from] treap::Error),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let args: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = match args.split_first() {
            Some((name, args)) => (*name, args),
            None => return Err(CommandError::Empty),
        };
        match (name, args) {
            ("insert", [position, value]) => {
                Ok(Command::Insert(position.parse()?, value.parse()?))
            },
            ("insert", _) => Err(CommandError::Arity(name.to_string(), "2")),
            ("erase", [position]) => Ok(Command::Erase(position.parse()?, 1)),
            ("erase", [position, count]) => {
                Ok(Command::Erase(position.parse()?, count.parse()?))
            },
            ("erase", _) => Err(CommandError::Arity(name.to_string(), "1 or 2")),
            ("sum", [from, to]) => Ok(Command::Sum(from.parse()?, to.parse()?)),
            ("sum", _) => Err(CommandError::Arity(name.to_string(), "2")),
            ("size", []) => Ok(Command::Size),
            ("print", []) => Ok(Command::Print),
            ("quit", []) => Ok(Command::Quit),
            ("size", _) | ("print", _) | ("quit", _) => {
                Err(CommandError::Arity(name.to_string(), "0"))
            },
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

fn execute(
    treap: &mut ImplicitTreap<i64>,
    command: &Command,
) -> Result<Option<String>, CommandError> {
    match *command {
        Command::Insert(position, value) => treap.insert(position, value)?,
        Command::Erase(position, count) => treap.erase(position, count)?,
        Command::Sum(from, to) => return Ok(Some(treap.range_sum(from, to)?.to_string())),
        Command::Size => return Ok(Some(treap.len().to_string())),
        Command::Print => return Ok(Some(format!("{:?}", treap))),
        Command::Quit => {},
    }
    Ok(None)
}

fn main() {
    let level = if env::var_os("IMPLICIT_TREAP_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = WriteLogger::init(level, Config::default(), io::stderr()) {
        eprintln!("error: could not initialize logger: {}", err);
    }

    let mut treap = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => ImplicitTreap::with_seed(seed),
            Err(err) => {
                eprintln!("error: invalid seed `{}`: {}", arg, err);
                process::exit(2);
            },
        },
        None => ImplicitTreap::new(),
    };
    info!("reading commands from stdin");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: {}", err);
                break;
            },
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {}", err);
                continue;
            },
        };
        if command == Command::Quit {
            break;
        }
        match execute(&mut treap, &command) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {},
            Err(err) => eprintln!("error: {}", err),
        }
    }
    info!("finished with {} values", treap.len());
}

#[cfg(test)]
mod tests {
    use super::{execute, Command, CommandError};
    use implicit_treap::treap::{Error, ImplicitTreap};

    #[test]
    fn test_parse() {
        assert_eq!("insert 0 5".parse::<Command>().unwrap(), Command::Insert(0, 5));
        assert_eq!("insert 3 -7".parse::<Command>().unwrap(), Command::Insert(3, -7));
        assert_eq!("erase 4".parse::<Command>().unwrap(), Command::Erase(4, 1));
        assert_eq!("erase 4 2".parse::<Command>().unwrap(), Command::Erase(4, 2));
        assert_eq!("  sum 0   7 ".parse::<Command>().unwrap(), Command::Sum(0, 7));
        assert_eq!("size".parse::<Command>().unwrap(), Command::Size);
        assert_eq!("print".parse::<Command>().unwrap(), Command::Print);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        match "".parse::<Command>() {
            Err(CommandError::Empty) => {},
            other => panic!("unexpected {:?}", other),
        }
        match "push 1".parse::<Command>() {
            Err(CommandError::Unknown(name)) => assert_eq!(name, "push"),
            other => panic!("unexpected {:?}", other),
        }
        match "insert 1".parse::<Command>() {
            Err(CommandError::Arity(ref name, "2")) if name == "insert" => {},
            other => panic!("unexpected {:?}", other),
        }
        match "size 1".parse::<Command>() {
            Err(CommandError::Arity(ref name, "0")) if name == "size" => {},
            other => panic!("unexpected {:?}", other),
        }
        match "erase -1".parse::<Command>() {
            Err(CommandError::Number(_)) => {},
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_execute() {
        let mut treap = ImplicitTreap::with_seed(3);
        for (index, value) in [5, 24, 42, 13, 99, 2, 17].iter().enumerate() {
            let output = execute(&mut treap, &Command::Insert(index, *value)).unwrap();
            assert_eq!(output, None);
        }
        assert_eq!(
            execute(&mut treap, &Command::Sum(0, 6)).unwrap(),
            Some("202".to_string()),
        );
        execute(&mut treap, &Command::Erase(4, 2)).unwrap();
        assert_eq!(
            execute(&mut treap, &Command::Print).unwrap(),
            Some("[5, 24, 42, 13, 17]".to_string()),
        );
        assert_eq!(
            execute(&mut treap, &Command::Size).unwrap(),
            Some("5".to_string()),
        );
        match execute(&mut treap, &Command::Erase(0, 0)) {
            Err(CommandError::Treap(Error::InvalidCount)) => {},
            other => panic!("unexpected {:?}", other),
        }
    }
}
