//! A two-variant union used wherever serialized data may take one of two
//! shapes, most importantly "reference or inline value".
//!
//! Decoding tries the first payload type and then the second, so the first
//! type silently wins on input both types accept. That ordering is part of
//! the contract: `Either<i64, f64>` decodes the literal `2` as `i64`.

use crate::reference::NOT_A_REFERENCE_MARKER;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Phrase opening an aggregated two-branch decode failure. Branch causes are
/// inspected for this phrase to recognize failures that wrap another
/// aggregated failure.
const NEITHER_MATCHED_MARKER: &str = "neither variant matched";

/// A value that is exactly one of two payloads.
///
/// There is no third state. Equality, ordering, and hashing delegate to
/// whichever payload is present. The union itself carries no name; its
/// meaning comes from the caller's choice of payload types, as in
/// [`ReferenceOr`](crate::ReferenceOr).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<A, B> {
    /// The first payload type. Tried first during decoding; wins ties.
    A(A),
    /// The second payload type. Tried only after the first fails to decode.
    B(B),
}

impl<A, B> Either<A, B> {
    /// The first payload, if present.
    pub fn a(&self) -> Option<&A> {
        match self {
            Either::A(a) => Some(a),
            Either::B(_) => None,
        }
    }

    /// The second payload, if present.
    pub fn b(&self) -> Option<&B> {
        match self {
            Either::A(_) => None,
            Either::B(b) => Some(b),
        }
    }

    /// Consume the union, yielding the first payload if present.
    pub fn into_a(self) -> Option<A> {
        match self {
            Either::A(a) => Some(a),
            Either::B(_) => None,
        }
    }

    /// Consume the union, yielding the second payload if present.
    pub fn into_b(self) -> Option<B> {
        match self {
            Either::A(_) => None,
            Either::B(b) => Some(b),
        }
    }

    /// Transform the first payload, leaving the second untouched.
    pub fn map_a<T>(self, f: impl FnOnce(A) -> T) -> Either<T, B> {
        match self {
            Either::A(a) => Either::A(f(a)),
            Either::B(b) => Either::B(b),
        }
    }

    /// Transform the second payload, leaving the first untouched.
    pub fn map_b<T>(self, f: impl FnOnce(B) -> T) -> Either<A, T> {
        match self {
            Either::A(a) => Either::A(a),
            Either::B(b) => Either::B(f(b)),
        }
    }
}

impl<A, B> Serialize for Either<A, B>
where
    A: Serialize,
    B: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Either::A(a) => a.serialize(serializer),
            Either::B(b) => b.serialize(serializer),
        }
    }
}

impl<'de, A, B> Deserialize<'de> for Either<A, B>
where
    A: DeserializeOwned,
    B: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let first = match serde_path_to_error::deserialize::<_, A>(&value) {
            Ok(a) => return Ok(Either::A(a)),
            Err(err) => BranchFailure::capture::<A>(err),
        };
        let second = match serde_path_to_error::deserialize::<_, B>(&value) {
            Ok(b) => return Ok(Either::B(b)),
            Err(err) => BranchFailure::capture::<B>(err),
        };
        Err(de::Error::custom(EitherDecodeError { first, second }))
    }
}

/// One branch's failure inside an [`EitherDecodeError`]: the payload type
/// that was tried, the relative coding path at which decoding failed, and
/// the underlying cause.
#[derive(Debug, Clone)]
pub struct BranchFailure {
    type_name: &'static str,
    path: String,
    depth: usize,
    cause: String,
}

impl BranchFailure {
    fn capture<T>(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let depth = err.path().iter().count();
        let path = err.path().to_string();
        Self {
            type_name: std::any::type_name::<T>(),
            path,
            depth,
            cause: err.into_inner().to_string(),
        }
    }

    /// The payload type this branch tried to decode.
    pub fn type_name(&self) -> &str {
        self.type_name
    }

    /// The coding path at which decoding failed, relative to the union.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// How many path segments deep the failure occurred.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The underlying failure message.
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Whether this failure only says the input was not shaped like a
    /// reference object at all.
    fn is_not_a_reference(&self) -> bool {
        self.cause.contains(NOT_A_REFERENCE_MARKER)
    }

    /// Whether this failure wraps another aggregated two-branch failure.
    fn wraps_aggregate(&self) -> bool {
        self.cause.contains(NEITHER_MATCHED_MARKER)
    }
}

/// Aggregated failure produced when neither payload type decodes.
///
/// Display prefers the more informative branch: when one branch merely says
/// "this was not a reference object" while the other failed deeper inside a
/// real structure (or wraps another aggregated failure), the deeper cause is
/// surfaced on its own. An author who wrote a fully-formed object rather
/// than a bare `{"$ref": ...}` wants to know why that object was rejected.
#[derive(Debug, Clone)]
pub struct EitherDecodeError {
    first: BranchFailure,
    second: BranchFailure,
}

impl EitherDecodeError {
    /// The failure of the first payload type tried.
    pub fn first(&self) -> &BranchFailure {
        &self.first
    }

    /// The failure of the second payload type tried.
    pub fn second(&self) -> &BranchFailure {
        &self.second
    }

    /// The branch worth surfacing on its own, if exactly one branch failed
    /// as "not a reference object" and the other failed more than one path
    /// segment deep or wraps another aggregated failure.
    fn informative_branch(&self) -> Option<&BranchFailure> {
        let worth_digging =
            |branch: &BranchFailure| branch.depth > 1 || branch.wraps_aggregate();
        match (
            self.first.is_not_a_reference(),
            self.second.is_not_a_reference(),
        ) {
            (true, false) if worth_digging(&self.second) => Some(&self.second),
            (false, true) if worth_digging(&self.first) => Some(&self.first),
            _ => None,
        }
    }
}

impl fmt::Display for EitherDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(branch) = self.informative_branch() {
            if branch.depth == 0 {
                return f.write_str(&branch.cause);
            }
            return write!(f, "{} (at {})", branch.cause, branch.path);
        }
        write!(
            f,
            "{NEITHER_MATCHED_MARKER}: {} failed at `{}` ({}); {} failed at `{}` ({})",
            self.first.type_name,
            self.first.path,
            self.first.cause,
            self.second.type_name,
            self.second.path,
            self.second.cause,
        )
    }
}

impl std::error::Error for EitherDecodeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;
    use crate::schema::Schema;
    use serde_json::json;

    #[test]
    fn test_first_listed_type_wins_ambiguous_input() {
        let whole: Either<i64, f64> = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(whole, Either::A(2));

        let fractional: Either<i64, f64> = serde_json::from_value(json!(2.1)).unwrap();
        assert_eq!(fractional, Either::B(2.1));
    }

    #[test]
    fn test_serialization_delegates_to_payload() {
        let a: Either<i64, f64> = Either::A(7);
        assert_eq!(serde_json::to_value(&a).unwrap(), json!(7));

        let b: Either<i64, bool> = Either::B(true);
        assert_eq!(serde_json::to_value(&b).unwrap(), json!(true));
    }

    #[test]
    fn test_accessors() {
        let union: Either<i64, bool> = Either::A(3);
        assert_eq!(union.a(), Some(&3));
        assert_eq!(union.b(), None);
        assert_eq!(union.clone().into_a(), Some(3));
        assert_eq!(union.map_a(|n| n * 2), Either::A(6));
    }

    #[test]
    fn test_both_branches_failing_reports_aggregate() {
        let err = serde_json::from_value::<Either<i64, bool>>(json!("nope")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("neither variant matched"));
        assert!(message.contains("i64"));
        assert!(message.contains("bool"));
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Envelope {
        #[allow(dead_code)]
        payload: Payload,
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        #[allow(dead_code)]
        count: u32,
    }

    #[test]
    fn test_deep_failure_surfaces_instead_of_aggregate() {
        let input = json!({"payload": {"count": "three"}});
        let err =
            serde_json::from_value::<Either<Reference<Schema>, Envelope>>(input).unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("neither variant matched"), "{message}");
        assert!(message.contains("three"), "{message}");
    }

    #[test]
    fn test_shallow_failure_keeps_aggregate() {
        let err =
            serde_json::from_value::<Either<Reference<Schema>, Envelope>>(json!(12)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("neither variant matched"), "{message}");
    }

    #[test]
    fn test_nested_union_failure_is_dug_out() {
        // The value under `properties.pet` is neither a reference nor a
        // schema, so the inner union aggregates. The outer union digs into
        // the schema branch rather than reporting its own aggregate.
        let input = json!({
            "type": "object",
            "properties": {
                "pet": {"type": "object", "maximum": "high"}
            }
        });
        let err =
            serde_json::from_value::<Either<Reference<Schema>, Schema>>(input).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("maximum") || message.contains("invalid type"), "{message}");
        assert!(message.contains("properties.pet"), "{message}");
    }
}
