//! Модуль, содержащий функции активации нейронов.
//!
//! Каждая стратегия — чистая функция: по пре-активации она возвращает пару
//! `(значение, производная)`, вычисленную в одной и той же точке. Производная
//! сохраняется слоем во время прямого прохода и затем используется обратным
//! проходом, поэтому она никогда не пересчитывается отдельно от значения.

use crate::nn::{NetworkError, NnResult};
use serde::{Deserialize, Serialize};

/// Закрытый набор функций активации.
///
/// Параметризованные варианты (`LeakyRelu`, `Elu`) создаются через
/// [`Activation::leaky_relu`] и [`Activation::elu`], которые проверяют
/// допустимость констант.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    /// y = x
    Linear,
    /// y = 1 если x > 0, иначе 0
    Binary,
    /// y = max(x, 0)
    Relu,
    /// y = x если x > 0, иначе leak * x
    LeakyRelu { leak: f32 },
    /// y = x если x > 0, иначе alpha * (e^x - 1)
    Elu { alpha: f32 },
    /// y = 1 / (1 + e^-x)
    Sigmoid,
    /// y = tanh(x)
    Tanh,
    /// y = x * sigmoid(x)
    Swish,
}

impl Activation {
    /// Создает LeakyReLU с проверкой коэффициента утечки.
    pub fn leaky_relu(leak: f32) -> NnResult<Self> {
        if leak < 0.0 {
            return Err(NetworkError::InvalidActivationParameter {
                name: "leak",
                value: leak,
            });
        }
        Ok(Self::LeakyRelu { leak })
    }

    /// Создает ELU с проверкой константы alpha.
    pub fn elu(alpha: f32) -> NnResult<Self> {
        if alpha < 0.0 {
            return Err(NetworkError::InvalidActivationParameter {
                name: "alpha",
                value: alpha,
            });
        }
        Ok(Self::Elu { alpha })
    }

    /// Вычисляет активацию и её производную в точке `input`.
    pub fn activate(&self, input: f32) -> (f32, f32) {
        match self {
            Self::Linear => (input, 1.0),
            Self::Binary => (if input > 0.0 { 1.0 } else { 0.0 }, 0.0),
            Self::Relu => (input.max(0.0), if input >= 0.0 { 1.0 } else { 0.0 }),
            Self::LeakyRelu { leak } => (
                if input > 0.0 { input } else { leak * input },
                if input >= 0.0 { 1.0 } else { *leak },
            ),
            Self::Elu { alpha } => {
                let value = if input > 0.0 {
                    input
                } else {
                    alpha * (input.exp() - 1.0)
                };
                // y' = alpha * e^x = y + alpha при x < 0
                let derivative = if input >= 0.0 { 1.0 } else { value + alpha };
                (value, derivative)
            }
            Self::Sigmoid => {
                let sigmoid = logistic(input);
                (sigmoid, sigmoid * (1.0 - sigmoid))
            }
            Self::Tanh => {
                let tanh = input.tanh();
                (tanh, 1.0 - tanh * tanh)
            }
            Self::Swish => {
                let sigmoid = logistic(input);
                let value = input * sigmoid;
                // y' = y + sigmoid(x) * (1 - y)
                (value, value + sigmoid * (1.0 - value))
            }
        }
    }
}

fn logistic(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
