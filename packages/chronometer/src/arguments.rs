//! Binding of call arguments to declared parameter names, for echoing them in keys.

use std::fmt::Display;

/// The declared parameter list of a function that is wrapped with
/// [`Chronometer::wrap_with_args()`](crate::Chronometer::wrap_with_args).
///
/// Rust has no runtime reflection of parameter names, so the wrapping code declares them,
/// in the same order as the function declares them. Parameters may carry a default value
/// which is used when a call does not supply that parameter.
///
/// # Examples
///
/// ```
/// use chronometer::Parameters;
///
/// let parameters = Parameters::new("resize")
///     .param("width")
///     .param("height")
///     .param_with_default("filter", "bilinear");
///
/// assert_eq!(parameters.function(), "resize");
/// assert_eq!(
///     parameters.names().collect::<Vec<_>>(),
///     vec!["width", "height", "filter"]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Parameters {
    function: String,
    parameters: Vec<Parameter>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Parameter {
    name: String,
    default: Option<String>,
}

impl Parameters {
    /// Starts an empty parameter list for the function with the given name.
    ///
    /// The function name only appears in error messages.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            parameters: Vec::new(),
        }
    }

    /// Declares the parameter names of a function without default values, in order.
    pub fn from_names<I, S>(function: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::new(function), |parameters, name| parameters.param(name))
    }

    /// Declares the next parameter, without a default value.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Declares the next parameter, with a default value used when a call does not supply it.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Display) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            default: Some(default.to_string()),
        });
        self
    }

    /// The name of the function these parameters belong to.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The declared parameter names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|parameter| parameter.name.as_str())
    }

    /// Whether a parameter with the given name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|declared| declared == name)
    }

    /// Binds the arguments of one call to the declared parameters.
    ///
    /// Positional values are assigned to parameters in declaration order. Keyword values then
    /// set the parameter of the same name, replacing any positional value; keywords that match
    /// no parameter are ignored. Finally, parameters that are still unbound take their default
    /// value, if they have one. Surplus positional values are ignored.
    pub(crate) fn bind(&self, arguments: &impl CallArguments) -> BoundArguments {
        let mut values = self
            .parameters
            .iter()
            .map(|_| None)
            .collect::<Vec<Option<String>>>();

        for (slot, value) in values.iter_mut().zip(arguments.positional()) {
            *slot = Some(value);
        }

        for (name, value) in arguments.keywords() {
            let position = self
                .parameters
                .iter()
                .position(|parameter| parameter.name == name);

            if let Some(slot) = position.and_then(|position| values.get_mut(position)) {
                *slot = Some(value);
            }
        }

        let bound = self
            .parameters
            .iter()
            .zip(values)
            .filter_map(|(parameter, value)| {
                value
                    .or_else(|| parameter.default.clone())
                    .map(|value| (parameter.name.clone(), value))
            })
            .collect();

        BoundArguments { bound }
    }
}

/// Parameter names mapped to the rendered values of one call, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoundArguments {
    bound: Vec<(String, String)>,
}

impl BoundArguments {
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.bound
            .iter()
            .find(|(bound_name, _)| bound_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bound
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Which bound arguments to append to the key of a wrapped function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum EchoArgs {
    /// Every bound parameter, in declaration order.
    ///
    /// If no parameter is bound for a call, the key gets no `(with ...)` suffix.
    #[default]
    All,

    /// Only the named parameters, in the order given here.
    ///
    /// Every name must be a declared parameter. An empty list behaves like [`Off`](Self::Off):
    /// the key gets no `(with ...)` suffix, not even an empty one.
    Only(Vec<String>),

    /// Nothing; the key is used as is.
    Off,
}

impl EchoArgs {
    /// Echoes only the named parameters, in the given order.
    #[must_use]
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }
}

/// The arguments of one call to a wrapped function, rendered as text.
///
/// This is implemented for `()` and for tuples of up to eight [`Display`] values, which
/// supply positional arguments only. Implement it for your own argument types to supply
/// keyword arguments, typically one per field.
///
/// # Examples
///
/// ```
/// use chronometer::CallArguments;
///
/// struct Query {
///     table: String,
///     limit: usize,
/// }
///
/// impl CallArguments for Query {
///     fn positional(&self) -> Vec<String> {
///         Vec::new()
///     }
///
///     fn keywords(&self) -> Vec<(String, String)> {
///         vec![
///             ("table".to_string(), self.table.clone()),
///             ("limit".to_string(), self.limit.to_string()),
///         ]
///     }
/// }
/// ```
pub trait CallArguments {
    /// The rendered positional arguments, in order.
    fn positional(&self) -> Vec<String>;

    /// The rendered keyword arguments as `(parameter name, value)` pairs.
    fn keywords(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl CallArguments for () {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! impl_call_arguments_for_tuple {
    ($($element:ident),+) => {
        impl<$($element: Display),+> CallArguments for ($($element,)+) {
            #[allow(non_snake_case, reason = "tuple elements reuse the type parameter names")]
            fn positional(&self) -> Vec<String> {
                let ($($element,)+) = self;
                vec![$($element.to_string()),+]
            }
        }
    };
}

impl_call_arguments_for_tuple!(A);
impl_call_arguments_for_tuple!(A, B);
impl_call_arguments_for_tuple!(A, B, C);
impl_call_arguments_for_tuple!(A, B, C, D);
impl_call_arguments_for_tuple!(A, B, C, D, E);
impl_call_arguments_for_tuple!(A, B, C, D, E, F);
impl_call_arguments_for_tuple!(A, B, C, D, E, F, G);
impl_call_arguments_for_tuple!(A, B, C, D, E, F, G, H);
