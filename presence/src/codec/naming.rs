//! Naming policies applied to field names on write.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

/// Case convention applied to encoded field names.
///
/// ```
/// use presence::codec::NamingPolicy;
/// assert_eq!(NamingPolicy::CamelCase.convert("IsSuccess"), "isSuccess");
/// assert_eq!(NamingPolicy::SnakeCaseUpper.convert("IsCancelled"), "IS_CANCELLED");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum NamingPolicy {
    /// `isSuccess`
    CamelCase,
    /// `is_success`
    SnakeCaseLower,
    /// `IS_SUCCESS`
    SnakeCaseUpper,
    /// `is-success`
    KebabCaseLower,
    /// `IS-SUCCESS`
    KebabCaseUpper,
}

impl NamingPolicy {
    /// Convert a canonical `PascalCase` name.
    #[must_use]
    pub fn convert(self, name: &str) -> String {
        match self {
            Self::CamelCase => name.to_lower_camel_case(),
            Self::SnakeCaseLower => name.to_snake_case(),
            Self::SnakeCaseUpper => name.to_shouty_snake_case(),
            Self::KebabCaseLower => name.to_kebab_case(),
            Self::KebabCaseUpper => name.to_shouty_kebab_case(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::NamingPolicy;

    #[rstest]
    #[case(NamingPolicy::CamelCase, "isCancelled")]
    #[case(NamingPolicy::SnakeCaseLower, "is_cancelled")]
    #[case(NamingPolicy::SnakeCaseUpper, "IS_CANCELLED")]
    #[case(NamingPolicy::KebabCaseLower, "is-cancelled")]
    #[case(NamingPolicy::KebabCaseUpper, "IS-CANCELLED")]
    fn converts_canonical_names(#[case] policy: NamingPolicy, #[case] expected: &str) {
        assert_eq!(policy.convert("IsCancelled"), expected);
    }

    #[rstest]
    #[case("\"camel-case\"", NamingPolicy::CamelCase)]
    #[case("\"snake-case-upper\"", NamingPolicy::SnakeCaseUpper)]
    fn policies_deserialize_from_kebab_names(
        #[case] text: &str,
        #[case] expected: NamingPolicy,
    ) -> anyhow::Result<()> {
        let parsed: NamingPolicy = serde_json::from_str(text)?;
        anyhow::ensure!(parsed == expected, "parsed {parsed:?} from {text}");
        Ok(())
    }
}
