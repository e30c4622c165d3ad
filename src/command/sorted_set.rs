use crate::command::{Reply, arg_to_i64, split_key, withscores_option};
use crate::error::{MockError, MockResult};
use crate::store::Namespace;
use crate::types::OrderedSet;
use crate::types::sorted_set::{Limit, Score, ScoreBound};
use crate::value::{Number, Options, Value};

/// ZADD arguments, normalized to `(score, member)` pairs in application order.
#[derive(Debug, Clone, PartialEq)]
pub struct ZAddArgs {
    pub key: String,
    pub pairs: Vec<(Score, String)>,
}

impl ZAddArgs {
    /// `score member [score member ...]`
    pub fn from_positional(key: String, values: &[Value]) -> MockResult<Self> {
        if values.len() % 2 != 0 {
            return Err(MockError::wrong_arg_count("zadd"));
        }
        let pairs = values
            .chunks(2)
            .map(|pair| Ok((parse_score(&pair[0])?, parse_member(&pair[1])?)))
            .collect::<MockResult<Vec<_>>>()?;
        Ok(ZAddArgs { key, pairs })
    }

    /// `member=score` keyword form.
    pub fn from_named<'a, I>(key: String, named: I) -> MockResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let pairs = named
            .into_iter()
            .map(|(member, score)| Ok((parse_score(score)?, member.clone())))
            .collect::<MockResult<Vec<_>>>()?;
        Ok(ZAddArgs { key, pairs })
    }

    /// Positional pairs first, then keyword pairs. At least one pair is required.
    pub fn parse(args: &[Value], options: &Options) -> MockResult<Self> {
        let (key, rest) = split_key("zadd", args)?;
        let mut zadd = ZAddArgs::from_positional(key.clone(), rest)?;
        zadd.pairs.extend(ZAddArgs::from_named(key, options)?.pairs);
        if zadd.pairs.is_empty() {
            return Err(MockError::wrong_arg_count("zadd"));
        }
        Ok(zadd)
    }
}

fn parse_score(value: &Value) -> MockResult<Score> {
    match value.as_number() {
        Some(Number::Int(n)) => Ok(Score::Int(n)),
        Some(Number::Float(f)) if !f.is_nan() => Ok(Score::Float(f)),
        Some(Number::Float(_)) => Err(MockError::invalid("sorted set score must not be NaN")),
        None => Err(MockError::invalid("sorted set score must be an integer or float")),
    }
}

fn parse_member(value: &Value) -> MockResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| MockError::invalid("sorted set member must be a string"))
}

/// ZRANGE / ZREVRANGE arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRangeArgs {
    pub key: String,
    pub start: i64,
    pub end: i64,
    pub withscores: bool,
}

impl RankRangeArgs {
    /// `key start end [WITHSCORES]`
    pub fn parse(cmd: &str, args: &[Value], options: &Options) -> MockResult<Self> {
        let (key, rest) = split_key(cmd, args)?;
        let (start, end, flag) = match rest {
            [start, end] => (start, end, false),
            [start, end, flag] if flag.is_keyword("WITHSCORES") => (start, end, true),
            [_, _, _] => return Err(MockError::syntax()),
            _ => return Err(MockError::wrong_arg_count(cmd)),
        };
        Ok(RankRangeArgs {
            key,
            start: arg_to_i64(start)?,
            end: arg_to_i64(end)?,
            withscores: flag || withscores_option(options),
        })
    }
}

/// ZRANGEBYSCORE / ZREVRANGEBYSCORE arguments, with bounds already in min/max order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRangeArgs {
    pub key: String,
    pub min: ScoreBound,
    pub max: ScoreBound,
    pub withscores: bool,
    pub limit: Option<Limit>,
}

impl ScoreRangeArgs {
    /// `key min max [WITHSCORES] [LIMIT offset count]`, or `key max min ...` when `reverse`.
    /// A bare trailing `offset count` pair is accepted in place of `LIMIT`.
    pub fn parse(cmd: &str, args: &[Value], options: &Options, reverse: bool) -> MockResult<Self> {
        let (key, rest) = split_key(cmd, args)?;
        if rest.len() < 2 {
            return Err(MockError::wrong_arg_count(cmd));
        }
        let first = parse_bound(&rest[0])?;
        let second = parse_bound(&rest[1])?;
        let (min, max) = if reverse { (second, first) } else { (first, second) };

        let mut withscores = withscores_option(options);
        let mut limit = None;
        let tail = &rest[2..];
        let mut i = 0;
        while i < tail.len() {
            if tail[i].is_keyword("WITHSCORES") {
                withscores = true;
                i += 1;
            } else if tail[i].is_keyword("LIMIT") {
                let (Some(offset), Some(count)) = (tail.get(i + 1), tail.get(i + 2)) else {
                    return Err(MockError::syntax());
                };
                limit = Some(parse_limit(offset, count)?);
                i += 3;
            } else if limit.is_none() && tail.len() - i == 2 {
                limit = Some(parse_limit(&tail[i], &tail[i + 1])?);
                i += 2;
            } else {
                return Err(MockError::syntax());
            }
        }

        if limit.is_none()
            && let (Some(offset), Some(count)) = (options.get("offset"), options.get("count"))
        {
            limit = Some(parse_limit(offset, count)?);
        }

        Ok(ScoreRangeArgs { key, min, max, withscores, limit })
    }
}

/// Text bounds may carry a `(` prefix; numeric bounds are inclusive.
/// A NaN bound is accepted and matches nothing.
fn parse_bound(value: &Value) -> MockResult<ScoreBound> {
    let bound = match value {
        Value::Str(s) | Value::Raw(s) => s.parse().ok(),
        Value::Int(n) => Some(ScoreBound::inclusive(*n as f64)),
        Value::Float(f) => Some(ScoreBound::inclusive(*f)),
        Value::Bool(_) => None,
    };
    bound.ok_or_else(|| MockError::invalid("min or max is not a float"))
}

fn parse_limit(offset: &Value, count: &Value) -> MockResult<Limit> {
    Ok(Limit {
        offset: arg_to_i64(offset)?,
        count: arg_to_i64(count)?,
    })
}

pub fn zadd(ns: &mut Namespace, args: ZAddArgs) -> MockResult<Reply> {
    let zset = ns.get_or_create::<OrderedSet>(&args.key)?;
    let mut added = zset.add_pairs(args.pairs);
    // a single pair answers with a bare flag
    if added.len() == 1 {
        return Ok(Reply::Bool(added.remove(0)));
    }
    Ok(Reply::Bools(added))
}

pub fn zrange(ns: &Namespace, args: &RankRangeArgs, reverse: bool) -> MockResult<Reply> {
    let zset = ns.get_or_empty::<OrderedSet>(&args.key)?;
    let items = zset.rank_range(args.start, args.end, reverse);
    Ok(Reply::from_range(items, args.withscores))
}

pub fn zrangebyscore(ns: &Namespace, args: &ScoreRangeArgs, reverse: bool) -> MockResult<Reply> {
    let zset = ns.get_or_empty::<OrderedSet>(&args.key)?;
    let items = zset.score_range(args.min, args.max, args.limit, reverse);
    Ok(Reply::from_range(items, args.withscores))
}
