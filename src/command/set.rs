use crate::command::{KeyArgs, Reply, arg_to_key, split_key};
use crate::error::{MockError, MockResult};
use crate::store::Namespace;
use crate::types::PlainSet;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SAddArgs {
    pub key: String,
    pub members: Vec<String>,
}

impl SAddArgs {
    /// `key member [member ...]`
    pub fn parse(args: &[Value]) -> MockResult<Self> {
        let (key, rest) = split_key("sadd", args)?;
        if rest.is_empty() {
            return Err(MockError::wrong_arg_count("sadd"));
        }
        Ok(SAddArgs {
            key,
            members: rest.iter().map(arg_to_key).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SIsMemberArgs {
    pub key: String,
    pub member: String,
}

impl SIsMemberArgs {
    /// `key member`
    pub fn parse(args: &[Value]) -> MockResult<Self> {
        match args {
            [key, member] => Ok(SIsMemberArgs {
                key: arg_to_key(key),
                member: arg_to_key(member),
            }),
            _ => Err(MockError::wrong_arg_count("sismember")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDiffArgs {
    pub key: String,
    pub others: Vec<String>,
}

impl SDiffArgs {
    /// `key [key ...]`
    pub fn parse(args: &[Value]) -> MockResult<Self> {
        let (key, rest) = split_key("sdiff", args)?;
        Ok(SDiffArgs {
            key,
            others: rest.iter().map(arg_to_key).collect(),
        })
    }
}

pub fn sadd(ns: &mut Namespace, args: SAddArgs) -> MockResult<Reply> {
    let set = ns.get_or_create::<PlainSet>(&args.key)?;
    let added = set.add(args.members);
    Ok(Reply::Integer(added as i64))
}

pub fn sismember(ns: &Namespace, args: &SIsMemberArgs) -> MockResult<Reply> {
    let set = ns.get_or_empty::<PlainSet>(&args.key)?;
    Ok(Reply::Bool(set.contains(&args.member)))
}

pub fn smembers(ns: &Namespace, args: &KeyArgs) -> MockResult<Reply> {
    let set = ns.get_or_empty::<PlainSet>(&args.key)?;
    Ok(Reply::Set(set.members()))
}

pub fn scard(ns: &Namespace, args: &KeyArgs) -> MockResult<Reply> {
    let set = ns.get_or_empty::<PlainSet>(&args.key)?;
    Ok(Reply::Integer(set.cardinality() as i64))
}

/// Every key is type-checked before anything is computed; absent keys count as empty.
pub fn sdiff(ns: &Namespace, args: &SDiffArgs) -> MockResult<Reply> {
    let base = ns.get_or_empty::<PlainSet>(&args.key)?;
    let others = args
        .others
        .iter()
        .map(|key| ns.get_or_empty::<PlainSet>(key))
        .collect::<MockResult<Vec<_>>>()?;
    Ok(Reply::Set(base.difference(others.iter().map(|set| &**set))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderedSet;
    use crate::types::sorted_set::Score;

    fn sadd_all(ns: &mut Namespace, key: &str, members: &[&str]) -> Reply {
        let args = SAddArgs {
            key: key.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        };
        sadd(ns, args).unwrap()
    }

    #[test]
    fn test_sadd_parse_stringifies_members() {
        let args = SAddArgs::parse(&["k".into(), Value::Int(1), Value::Float(2.5)]).unwrap();
        assert_eq!(args.members, vec!["1", "2.5"]);
        assert!(SAddArgs::parse(&["k".into()]).is_err());
    }

    #[test]
    fn test_sismember_arity() {
        assert!(SIsMemberArgs::parse(&["k".into()]).is_err());
        assert!(SIsMemberArgs::parse(&["k".into(), "a".into(), "b".into()]).is_err());
    }

    #[test]
    fn test_sadd_counts() {
        let mut ns = Namespace::new();
        assert_eq!(sadd_all(&mut ns, "k", &["a"]), Reply::Integer(1));
        assert_eq!(sadd_all(&mut ns, "k", &["a", "b"]), Reply::Integer(1));
        assert_eq!(scard(&ns, &KeyArgs { key: "k".into() }).unwrap(), Reply::Integer(2));
    }

    #[test]
    fn test_reads_on_missing_key() {
        let ns = Namespace::new();
        let key = KeyArgs { key: "nope".into() };
        assert_eq!(scard(&ns, &key).unwrap(), Reply::Integer(0));
        assert_eq!(smembers(&ns, &key).unwrap(), Reply::Set(Default::default()));
        let member = SIsMemberArgs { key: "nope".into(), member: "a".into() };
        assert_eq!(sismember(&ns, &member).unwrap(), Reply::Bool(false));
        assert!(ns.is_empty());
    }

    #[test]
    fn test_sdiff_type_checks_every_key() {
        let mut ns = Namespace::new();
        sadd_all(&mut ns, "s", &["a"]);
        ns.get_or_create::<OrderedSet>("z").unwrap().add("a".into(), Score::Int(1));
        let args = SDiffArgs { key: "s".into(), others: vec!["missing".into(), "z".into()] };
        assert!(matches!(sdiff(&ns, &args), Err(MockError::TypeMismatch { .. })));
    }
}
