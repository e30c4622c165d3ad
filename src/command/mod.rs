pub mod set;
pub mod sorted_set;

use crate::error::{MockError, MockResult};
use crate::store::Namespace;
use crate::value::{Options, Value};
use std::collections::HashSet;

pub use set::{SAddArgs, SDiffArgs, SIsMemberArgs};
pub use sorted_set::{RankRangeArgs, ScoreRangeArgs, ZAddArgs};

/// Every supported command, with its arguments already validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ZAdd(ZAddArgs),
    ZRange(RankRangeArgs),
    ZRevRange(RankRangeArgs),
    ZRangeByScore(ScoreRangeArgs),
    ZRevRangeByScore(ScoreRangeArgs),
    SAdd(SAddArgs),
    SIsMember(SIsMemberArgs),
    SMembers(KeyArgs),
    SCard(KeyArgs),
    SDiff(SDiffArgs),
}

/// Arguments of commands that take a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyArgs {
    pub key: String,
}

impl KeyArgs {
    fn parse(cmd: &str, args: &[Value]) -> MockResult<Self> {
        match args {
            [key] => Ok(KeyArgs { key: arg_to_key(key) }),
            _ => Err(MockError::wrong_arg_count(cmd)),
        }
    }
}

impl Command {
    /// Decide which command a call names and validate its argument shape.
    pub fn parse(name: &str, args: &[Value], options: &Options) -> MockResult<Command> {
        match name.to_ascii_uppercase().as_str() {
            "ZADD" => ZAddArgs::parse(args, options).map(Command::ZAdd),
            "ZRANGE" => RankRangeArgs::parse("zrange", args, options).map(Command::ZRange),
            "ZREVRANGE" => RankRangeArgs::parse("zrevrange", args, options).map(Command::ZRevRange),
            "ZRANGEBYSCORE" => {
                ScoreRangeArgs::parse("zrangebyscore", args, options, false).map(Command::ZRangeByScore)
            }
            "ZREVRANGEBYSCORE" => ScoreRangeArgs::parse("zrevrangebyscore", args, options, true)
                .map(Command::ZRevRangeByScore),
            "SADD" => SAddArgs::parse(args).map(Command::SAdd),
            "SISMEMBER" => SIsMemberArgs::parse(args).map(Command::SIsMember),
            "SMEMBERS" => KeyArgs::parse("smembers", args).map(Command::SMembers),
            "SCARD" => KeyArgs::parse("scard", args).map(Command::SCard),
            "SDIFF" => SDiffArgs::parse(args).map(Command::SDiff),
            _ => Err(MockError::UnimplementedCommand(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::ZAdd(_) => "ZADD",
            Command::ZRange(_) => "ZRANGE",
            Command::ZRevRange(_) => "ZREVRANGE",
            Command::ZRangeByScore(_) => "ZRANGEBYSCORE",
            Command::ZRevRangeByScore(_) => "ZREVRANGEBYSCORE",
            Command::SAdd(_) => "SADD",
            Command::SIsMember(_) => "SISMEMBER",
            Command::SMembers(_) => "SMEMBERS",
            Command::SCard(_) => "SCARD",
            Command::SDiff(_) => "SDIFF",
        }
    }

    /// Apply the command to the namespace.
    pub fn execute(self, ns: &mut Namespace) -> MockResult<Reply> {
        match self {
            Command::ZAdd(args) => sorted_set::zadd(ns, args),
            Command::ZRange(args) => sorted_set::zrange(ns, &args, false),
            Command::ZRevRange(args) => sorted_set::zrange(ns, &args, true),
            Command::ZRangeByScore(args) => sorted_set::zrangebyscore(ns, &args, false),
            Command::ZRevRangeByScore(args) => sorted_set::zrangebyscore(ns, &args, true),
            Command::SAdd(args) => set::sadd(ns, args),
            Command::SIsMember(args) => set::sismember(ns, &args),
            Command::SMembers(args) => set::smembers(ns, &args),
            Command::SCard(args) => set::scard(ns, &args),
            Command::SDiff(args) => set::sdiff(ns, &args),
        }
    }
}

/// The result of a command, shaped like the emulated client's return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Bool(bool),
    Bools(Vec<bool>),
    Integer(i64),
    Members(Vec<String>),
    WithScores(Vec<(String, f64)>),
    Set(HashSet<String>),
}

impl Reply {
    fn from_range(items: Vec<(&str, f64)>, withscores: bool) -> Reply {
        if withscores {
            Reply::WithScores(items.into_iter().map(|(m, s)| (m.to_string(), s)).collect())
        } else {
            Reply::Members(items.into_iter().map(|(m, _)| m.to_string()).collect())
        }
    }
}

/// Keys and plain-set members accept any value, converted to text.
pub fn arg_to_key(arg: &Value) -> String {
    arg.to_string()
}

pub fn arg_to_i64(arg: &Value) -> MockResult<i64> {
    arg.as_i64().ok_or_else(MockError::not_integer)
}

/// Split off the leading key, failing with an arity error when absent.
fn split_key<'a>(cmd: &str, args: &'a [Value]) -> MockResult<(String, &'a [Value])> {
    match args.split_first() {
        Some((key, rest)) => Ok((arg_to_key(key), rest)),
        None => Err(MockError::wrong_arg_count(cmd)),
    }
}

fn withscores_option(options: &Options) -> bool {
    options.get("withscores").is_some_and(Value::is_truthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str, args: Vec<Value>) -> MockResult<Command> {
        Command::parse(name, &args, &Options::new())
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("GET", vec!["k".into()]),
            Err(MockError::UnimplementedCommand("GET".into()))
        );
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let cmd = parse("smembers", vec!["k".into()]).unwrap();
        assert_eq!(cmd.name(), "SMEMBERS");
        assert_eq!(cmd, Command::SMembers(KeyArgs { key: "k".into() }));
    }

    #[test]
    fn test_key_arity() {
        assert!(matches!(parse("SCARD", vec![]), Err(MockError::InvalidArgument(_))));
        assert!(matches!(
            parse("SCARD", vec!["a".into(), "b".into()]),
            Err(MockError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_keys_are_stringified() {
        let cmd = parse("SCARD", vec![Value::Int(7)]).unwrap();
        assert_eq!(cmd, Command::SCard(KeyArgs { key: "7".into() }));
    }

    #[test]
    fn test_non_string_keys_read_like_the_client() {
        let cmd = parse("SCARD", vec![Value::Float(1.0)]).unwrap();
        assert_eq!(cmd, Command::SCard(KeyArgs { key: "1.0".into() }));
        let cmd = parse("SCARD", vec![Value::Bool(true)]).unwrap();
        assert_eq!(cmd, Command::SCard(KeyArgs { key: "True".into() }));
        let cmd = parse("SCARD", vec![Value::raw("007")]).unwrap();
        assert_eq!(cmd, Command::SCard(KeyArgs { key: "007".into() }));
    }
}
