//! Matchers shared by the test suites of the workspace crates.

use std::marker::PhantomData;

use googletest::{
    description::Description,
    matcher::{Matcher, MatcherBase, MatcherResult},
};

/// Creates a matcher against an `anyhow::Error` whose cause chain contains an
/// error of type `E` that matches the inner matcher.
pub fn anyhow_downcasts_to<E, M>(inner: M) -> AnyhowDowncastTo<E, M> {
    AnyhowDowncastTo::<E, M> {
        inner,
        phantom_e: Default::default(),
    }
}

pub struct AnyhowDowncastTo<E, M> {
    inner: M,
    phantom_e: PhantomData<E>,
}

impl<E, M> AnyhowDowncastTo<E, M>
where
    E: std::error::Error + 'static,
{
    fn type_name() -> &'static str {
        std::any::type_name::<E>()
    }

    fn find(actual: &anyhow::Error) -> Option<&E> {
        actual.chain().find_map(|cause| cause.downcast_ref::<E>())
    }
}

impl<E, M> MatcherBase for AnyhowDowncastTo<E, M> {}

impl<E, M> Matcher<&anyhow::Error> for AnyhowDowncastTo<E, M>
where
    E: Copy + std::error::Error + Send + Sync + 'static,
    M: Matcher<E>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        Self::find(actual)
            .map(|v| self.inner.matches(*v))
            .unwrap_or(MatcherResult::NoMatch)
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        match Self::find(actual) {
            Some(e) => Description::new()
                .text(format!("which has a cause of type {}", Self::type_name()))
                .text("with value")
                .nested(self.inner.explain_match(*e)),
            None => Description::new().text(format!(
                "which has no cause of type {} in {:#}",
                Self::type_name(),
                actual
            )),
        }
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        match matcher_result {
            MatcherResult::Match => format!(
                "has a cause of type {} with value which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::Match)
            )
            .into(),
            MatcherResult::NoMatch => format!(
                "has no cause of type {} with value which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::Match)
            )
            .into(),
        }
    }
}

/// Creates a matcher against an `anyhow::Error` whose full context chain,
/// rendered as with `{:#}`, contains `needle`.
pub fn anyhow_mentions(needle: &str) -> AnyhowMentions {
    AnyhowMentions {
        needle: needle.to_string(),
    }
}

pub struct AnyhowMentions {
    needle: String,
}

impl MatcherBase for AnyhowMentions {}

impl Matcher<&anyhow::Error> for AnyhowMentions {
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        format!("{actual:#}").contains(&self.needle).into()
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        Description::new().text(format!("which renders as {actual:#}"))
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        match matcher_result {
            MatcherResult::Match => format!("mentions {:?}", self.needle).into(),
            MatcherResult::NoMatch => format!("does not mention {:?}", self.needle).into(),
        }
    }
}
