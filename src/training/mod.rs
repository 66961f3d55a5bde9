//! Модуль, содержащий алгоритмы обучения и их стратегии.
//!
//! Обучение устроено как внешний алгоритм над сетью: тренер не владеет
//! сетью, а заимствует ее изменяемо на время вызова `train`. Все изменяемое
//! состояние обучения (градиенты, дельты весов) живет на слоях самой сети,
//! поэтому два одновременных вызова `train` над одной сетью невозможны по
//! построению.

pub mod backprop;

pub use backprop::GradientDescent;

use crate::data::DataError;
use crate::losses::LossError;
use crate::nn::{Network, NetworkError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Коэффициент, с которым дельта предыдущей эпохи добавляется к текущему
/// обновлению весов.
pub const MOMENTUM: f32 = 0.1;

/// Трейт, определяющий общий интерфейс алгоритмов обучения.
pub trait Trainer {
    /// Выполняет обучение сети и возвращает итог цикла.
    fn train(&self, network: &mut Network) -> Result<TrainingOutcome, TrainingError>;
}

/// Стратегия масштабирования сигнала ошибки.
pub trait LearningRate {
    /// Применяет скорость обучения к сигналу.
    fn apply(&self, signal: f32) -> f32;
}

/// Постоянная скорость обучения: сигнал умножается на константу.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlatLearningRate {
    rate: f32,
}

impl FlatLearningRate {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }
}

impl LearningRate for FlatLearningRate {
    fn apply(&self, signal: f32) -> f32 {
        self.rate * signal
    }
}

/// Итог обучающего цикла.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutcome {
    /// Сколько эпох было выполнено.
    pub epochs: usize,
    /// Последняя вычисленная средняя ошибка батча. `None`, если не
    /// завершился ни один полный батч.
    pub batch_loss: Option<f32>,
    /// Остановилось ли обучение по порогу ошибки (а не по пределу эпох).
    pub converged: bool,
}

/// Ошибки уровня тренера.
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("network must be built before training")]
    NotBuilt,
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    /// Любая ошибка внутри последовательности "выборка -> прямой проход ->
    /// обратный проход -> обновление -> ошибка" одной эпохи прерывает весь
    /// вызов `train`.
    #[error("error running the network during gradient descent: {source}")]
    Epoch {
        #[from]
        source: EpochError,
    },
}

/// Ошибка, возникшая внутри одной эпохи обучения.
#[derive(Error, Debug)]
pub enum EpochError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Loss(#[from] LossError),
}
