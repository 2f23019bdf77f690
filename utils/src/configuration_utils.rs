use tracing::warn;

/// A value that can be read from a user-supplied string, typically an environment variable.
///
/// `parse` never fails: a value that cannot be interpreted is reported and the default is kept.
pub trait ParsableConfigValue: Sized {
    fn parse_user_value(value: &str) -> Option<Self>;

    fn parse(variable_name: &str, value: Option<String>, default: Self) -> Self {
        let Some(value) = value else {
            return default;
        };

        match Self::parse_user_value(value.trim()) {
            Some(v) => v,
            None => {
                warn!("Configuration value {value:?} for {variable_name} could not be parsed; using default.");
                default
            },
        }
    }
}

macro_rules! impl_parsable_from_str {
    ($($t:ty),+) => {
        $(
            impl ParsableConfigValue for $t {
                fn parse_user_value(value: &str) -> Option<Self> {
                    value.parse::<$t>().ok()
                }
            }
        )+
    };
}

impl_parsable_from_str!(usize, u8, u16, u32, u64, i32, i64, f32, f64);

impl ParsableConfigValue for bool {
    fn parse_user_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        }
    }
}

impl ParsableConfigValue for String {
    fn parse_user_value(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }
}
