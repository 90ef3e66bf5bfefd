//! Wrapping of functions so that every call is measured.

use tracing::trace;

use crate::arguments::BoundArguments;
use crate::{CallArguments, Chronometer, EchoArgs, Error, Options, Parameters, Result};

impl Chronometer {
    /// Wraps `f` so that every call of the returned function is measured under `key`.
    ///
    /// The wrapper takes the same argument and returns the same value as `f`. Functions with
    /// several parameters take them as one tuple.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::Chronometer;
    ///
    /// let chronometer = Chronometer::builder().log(false).build();
    ///
    /// let square = chronometer.wrap("square", |x: u64| x * x);
    ///
    /// assert_eq!(square(3), 9);
    /// assert_eq!(square(4), 16);
    /// assert_eq!(chronometer.durations("square").unwrap().len(), 2);
    /// ```
    #[must_use]
    pub fn wrap<A, R>(&self, key: impl Into<String>, f: impl Fn(A) -> R) -> impl Fn(A) -> R {
        self.wrap_with(key, Options::new(), f)
    }

    /// Like [`wrap()`](Self::wrap) but with overrides of the output settings that apply to
    /// every call of the wrapper.
    #[must_use]
    pub fn wrap_with<A, R>(
        &self,
        key: impl Into<String>,
        options: Options,
        f: impl Fn(A) -> R,
    ) -> impl Fn(A) -> R {
        let key = key.into();
        let settings = options.resolve(self.settings());

        move |arguments: A| {
            let _measurement = self.measure_resolved(key.clone(), settings.clone());
            f(arguments)
        }
    }

    /// Wraps `f` so that every call is measured under a key that includes the values the call
    /// was made with.
    ///
    /// The arguments of each call are bound to the declared `parameters` (see
    /// [`CallArguments`]) and the parameters selected by `echo` are appended to the key as
    /// `"<key> (with a=1, b=2)"`. Calls with different values are therefore recorded under
    /// different keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] if `echo` names a parameter that is not declared
    /// in `parameters`.
    ///
    /// The wrapper itself returns [`Error::UnknownParameter`] without calling `f` if `echo`
    /// names a parameter that ends up without a value for that call.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronometer::{Chronometer, Collector, EchoArgs, Options, Parameters};
    ///
    /// let collector = Collector::new();
    /// let chronometer = Chronometer::builder().sink(collector.clone()).build();
    ///
    /// let scale = chronometer
    ///     .wrap_with_args(
    ///         "scale",
    ///         Parameters::from_names("scale", ["value", "factor"]),
    ///         EchoArgs::only(["factor"]),
    ///         Options::new(),
    ///         |(value, factor): (u32, u32)| value * factor,
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(scale((7, 3)).unwrap(), 21);
    ///
    /// assert!(collector.lines()[0].starts_with("scale (with factor=3) took "));
    /// ```
    pub fn wrap_with_args<A, R>(
        &self,
        key: impl Into<String>,
        parameters: Parameters,
        echo: EchoArgs,
        options: Options,
        f: impl Fn(A) -> R,
    ) -> Result<impl Fn(A) -> Result<R>>
    where
        A: CallArguments,
    {
        if let EchoArgs::Only(names) = &echo {
            if let Some(unknown) = names.iter().find(|name| !parameters.contains(name)) {
                return Err(Error::UnknownParameter {
                    name: unknown.clone(),
                    function: parameters.function().to_string(),
                });
            }
        }

        let key = key.into();
        let settings = options.resolve(self.settings());

        Ok(move |arguments: A| {
            let key = echoed_key(&key, &parameters, &echo, &arguments)?;

            let _measurement = self.measure_resolved(key, settings.clone());
            Ok(f(arguments))
        })
    }
}

/// Renders the key of one call, with the selected argument values appended.
fn echoed_key(
    key: &str,
    parameters: &Parameters,
    echo: &EchoArgs,
    arguments: &impl CallArguments,
) -> Result<String> {
    let echoed = match echo {
        EchoArgs::Off => return Ok(key.to_string()),
        EchoArgs::All => {
            let bound = parameters.bind(arguments);
            bound
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
        }
        EchoArgs::Only(names) => {
            let bound = parameters.bind(arguments);
            names
                .iter()
                .map(|name| echo_one(&bound, name, parameters))
                .collect::<Result<Vec<_>>>()?
        }
    };

    if echoed.is_empty() {
        return Ok(key.to_string());
    }

    let rendered = format!("{key} (with {})", echoed.join(", "));
    trace!(key = %rendered, "echoed call arguments");

    Ok(rendered)
}

fn echo_one(bound: &BoundArguments, name: &str, parameters: &Parameters) -> Result<String> {
    bound
        .get(name)
        .map(|value| format!("{name}={value}"))
        .ok_or_else(|| Error::UnknownParameter {
            name: name.to_string(),
            function: parameters.function().to_string(),
        })
}
