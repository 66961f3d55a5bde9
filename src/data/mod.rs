//! Модуль, определяющий контейнер обучающих примеров.
//!
//! Примеры хранятся по столбцам: столбец `i` матрицы входов и столбец `i`
//! матрицы ожидаемых выходов образуют одну пару. Вместе с данными контейнер
//! несет политику обучающего цикла: предел эпох и порог ранней остановки.

use ndarray::{Array1, Array2};
use thiserror::Error;

pub type DataResult<T> = std::result::Result<T, DataError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("inputs and expected outputs must have the same number of examples: {inputs} vs {expected}")]
    ExampleCountMismatch { inputs: usize, expected: usize },
    #[error("data set contains no examples")]
    NoExamples,
    #[error("epoch {epoch} is out of range for {examples} examples")]
    EpochOutOfRange { epoch: usize, examples: usize },
}

/// Пары "вход — ожидаемый выход" с политикой индексирования по эпохам.
///
/// Если `max_epochs` больше числа примеров, индекс эпохи берется по модулю
/// числа примеров (режим зацикливания); иначе выход за границу — ошибка.
#[derive(Debug, Clone)]
pub struct SupervisedLearningData {
    inputs: Array2<f32>,
    expected: Array2<f32>,
    max_epochs: usize,
    min_error: f32,
}

impl SupervisedLearningData {
    /// Создает контейнер из двух матриц с равным числом столбцов.
    ///
    /// По умолчанию `max_epochs` равен числу примеров, `min_error` равен 0.
    pub fn new(inputs: Array2<f32>, expected: Array2<f32>) -> DataResult<Self> {
        if inputs.ncols() != expected.ncols() {
            return Err(DataError::ExampleCountMismatch {
                inputs: inputs.ncols(),
                expected: expected.ncols(),
            });
        }

        let max_epochs = inputs.ncols();
        Ok(Self {
            inputs,
            expected,
            max_epochs,
            min_error: 0.0,
        })
    }

    /// Задает предел эпох обучения.
    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Задает порог средней ошибки, при котором обучение останавливается.
    pub fn with_min_error(mut self, min_error: f32) -> Self {
        self.min_error = min_error;
        self
    }

    /// Число примеров (столбцов).
    pub fn example_count(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn min_error(&self) -> f32 {
        self.min_error
    }

    /// Возвращает пару "вход — ожидаемый выход" для эпохи `epoch`.
    pub fn get(&self, epoch: usize) -> DataResult<(Array1<f32>, Array1<f32>)> {
        let examples = self.example_count();
        if examples == 0 {
            return Err(DataError::NoExamples);
        }

        let index = if self.max_epochs > examples {
            epoch % examples
        } else if epoch < examples {
            epoch
        } else {
            return Err(DataError::EpochOutOfRange { epoch, examples });
        };

        Ok((
            self.inputs.column(index).to_owned(),
            self.expected.column(index).to_owned(),
        ))
    }
}
