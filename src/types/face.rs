/// Logical actuator position, only `1..=20` is wired.
pub type FaceId = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    A,
    B,
}

impl Bank {
    pub const ALL: [Bank; 2] = [Bank::A, Bank::B];
}

impl core::fmt::Display for Bank {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Where the pulse for a face ends up.
///
/// `Direct` channels are PCA9685 outputs, `Mux` channels are multiplexer lines
/// behind the shared PCA9685 output of their bank.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputPath {
    None,
    Direct(u8),
    Mux(Bank, u8),
}

impl Default for OutputPath {
    fn default() -> Self {
        Self::None
    }
}

impl core::fmt::Display for OutputPath {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Direct(channel) => write!(f, "PWM{}", channel),
            Self::Mux(bank, channel) => write!(f, "MUX{}:{}", bank, channel),
        }
    }
}
