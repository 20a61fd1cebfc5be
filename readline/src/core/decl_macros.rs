// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Log a non fatal configuration problem and hand it back, so that callers can both
/// record it and return it as [`crate::BindOutcome::Ignored`].
///
/// ```ignore
/// return ok!(warn_ignored!(StatementWarning::MalformedSet { statement }));
/// ```
#[macro_export]
macro_rules! warn_ignored {
    ($warning:expr) => {{
        let warning = $warning;
        tracing::warn!(message = "readline -> statement ignored", warning = %warning);
        $crate::BindOutcome::Ignored(warning)
    }};
}
