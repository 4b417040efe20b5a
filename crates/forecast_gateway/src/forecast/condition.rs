/// Weather condition codes published by TMD for daily forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    LightRain,
    ModerateRain,
    HeavyRain,
    Thunderstorm,
    VeryCold,
    Cold,
    Cool,
    VeryHot,
}

impl Condition {
    /// Codes arrive as JSON numbers; only whole values 1 through 12 are defined.
    pub fn from_code(code: f64) -> Option<Self> {
        if code.fract() != 0.0 {
            return None;
        }
        let condition = match code as i64 {
            1 => Condition::Clear,
            2 => Condition::PartlyCloudy,
            3 => Condition::Cloudy,
            4 => Condition::Overcast,
            5 => Condition::LightRain,
            6 => Condition::ModerateRain,
            7 => Condition::HeavyRain,
            8 => Condition::Thunderstorm,
            9 => Condition::VeryCold,
            10 => Condition::Cold,
            11 => Condition::Cool,
            12 => Condition::VeryHot,
            _ => return None,
        };
        Some(condition)
    }

    /// Thai description followed by the English one in parentheses
    pub fn label(self) -> &'static str {
        match self {
            Condition::Clear => "ท้องฟ้าแจ่มใส (Clear)",
            Condition::PartlyCloudy => "มีเมฆบางส่วน (Partly cloudy)",
            Condition::Cloudy => "เมฆเป็นส่วนมาก (Cloudy)",
            Condition::Overcast => "มีเมฆมาก (Overcast)",
            Condition::LightRain => "ฝนตกเล็กน้อย (Light rain)",
            Condition::ModerateRain => "ฝนปานกลาง (Moderate rain)",
            Condition::HeavyRain => "ฝนตกหนัก (Heavy rain)",
            Condition::Thunderstorm => "ฝนฟ้าคะนอง (Thunderstorm)",
            Condition::VeryCold => "อากาศหนาวจัด (Very cold)",
            Condition::Cold => "อากาศหนาว (Cold)",
            Condition::Cool => "อากาศเย็น (Cool)",
            Condition::VeryHot => "อากาศร้อนจัด (Very hot)",
        }
    }
}

/// Unknown codes become an empty label rather than being dropped.
pub fn condition_label(code: f64) -> &'static str {
    Condition::from_code(code)
        .map(Condition::label)
        .unwrap_or_default()
}
