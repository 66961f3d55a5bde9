//! Модуль, реализующий обратное распространение ошибки с градиентным
//! спуском.
//!
//! Одна эпоха обрабатывает один обучающий пример: прямой прогон сети,
//! обратный проход от последнего слоя к первому (градиенты), проход от
//! первого слоя к последнему (обновление весов с учетом скорости обучения
//! и импульса), затем подсчет ошибки эпохи. Средняя ошибка батча
//! сравнивается с порогом ранней остановки.
//!
//! Обновления применяются слой за слоем без отката: если эпоха прерывается
//! ошибкой посреди обновления, часть слоев уже изменена. Вызов `train`
//! в этом случае завершается целиком, без повторов и пропусков эпох.

use crate::data::SupervisedLearningData;
use crate::losses::Loss;
use crate::nn::{Network, NetworkError};
use crate::training::{
    EpochError, LearningRate, Trainer, TrainingError, TrainingOutcome, MOMENTUM,
};
use ndarray::{s, Array1, Axis};
use tracing::{debug, info};

/// Тренер: обратное распространение ошибки + градиентный спуск.
///
/// Владеет конфигурацией (стратегиями, данными, размером батча) и заимствует
/// сеть изменяемо на время [`Trainer::train`].
pub struct GradientDescent<L: LearningRate> {
    learning_rate: L,
    loss: Loss,
    data: SupervisedLearningData,
    batch_size: usize,
}

impl<L: LearningRate> GradientDescent<L> {
    /// Создает тренер. Размер батча должен быть больше нуля.
    pub fn new(
        learning_rate: L,
        loss: Loss,
        data: SupervisedLearningData,
        batch_size: usize,
    ) -> Result<Self, TrainingError> {
        if batch_size == 0 {
            return Err(TrainingError::ZeroBatchSize);
        }
        Ok(Self {
            learning_rate,
            loss,
            data,
            batch_size,
        })
    }

    pub fn data(&self) -> &SupervisedLearningData {
        &self.data
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Одна эпоха: выборка примера, прямой прогон, градиенты, обновление,
    /// ошибка. Ошибка эпохи считается по выходам прямого прогона этой же
    /// эпохи, то есть по состоянию весов до примененного обновления.
    fn run_epoch(&self, network: &mut Network, epoch: usize) -> Result<f32, EpochError> {
        let (inputs, expected) = self.data.get(epoch)?;

        // Сеть прогоняется заново в каждой эпохе: результат предыдущего
        // запуска относится к другому примеру.
        network.run(&inputs)?;

        self.backward(network, &expected)?;
        self.update(network)?;

        let loss = self.loss.calculate(&expected, network.outputs()?)?;
        Ok(loss)
    }

    /// Обратный проход: от последнего слоя к первому.
    ///
    /// Для выходного слоя сигнал ошибки — `expected - outputs`. Для скрытого
    /// слоя сигнал каждого нейрона накапливается по строкам нижестоящего
    /// слоя: градиент строки умножается на ее веса без столбца смещения.
    /// Градиент слоя — поэлементное произведение производных активации и
    /// сигнала ошибки.
    fn backward(&self, network: &mut Network, expected: &Array1<f32>) -> Result<(), EpochError> {
        let layers = network.layers_mut();

        for index in (0..layers.len()).rev() {
            let sigma = if index + 1 == layers.len() {
                let outputs = layers[index]
                    .outputs()
                    .ok_or(NetworkError::NotActivated)?;
                expected - outputs
            } else {
                let (current, downstream) = layers.split_at(index + 1);
                let layer = &current[index];
                let next = &downstream[0];
                let next_gradients = next.gradients().ok_or(NetworkError::NotActivated)?;

                // Столбец смещения нижестоящего слоя не распространяет
                // ошибку назад.
                let neuron_count = layer.neuron_count();
                next.input_weights()
                    .slice(s![.., ..neuron_count])
                    .t()
                    .dot(next_gradients)
            };

            let derivatives = layers[index]
                .derivatives()
                .ok_or(NetworkError::NotActivated)?;
            let gradients = derivatives * &sigma;
            layers[index].set_gradients(gradients);
        }

        Ok(())
    }

    /// Проход обновления весов: от первого слоя к последнему.
    ///
    /// Строка дельты нейрона — входной вектор слоя (со смещением),
    /// умноженный на градиент нейрона, пропущенный через скорость обучения.
    /// К весам добавляется новая дельта и дельта предыдущей эпохи с
    /// коэффициентом импульса.
    fn update(&self, network: &mut Network) -> Result<(), EpochError> {
        for layer in network.layers_mut() {
            let gradients = layer.gradients().ok_or(NetworkError::NotActivated)?;
            let scaled = gradients.mapv(|gradient| self.learning_rate.apply(gradient));
            let inputs = layer.bias_augmented_inputs()?;

            let new_delta = scaled
                .view()
                .insert_axis(Axis(1))
                .dot(&inputs.view().insert_axis(Axis(0)));
            layer.apply_delta(new_delta, MOMENTUM);
        }

        Ok(())
    }
}

impl<L: LearningRate> Trainer for GradientDescent<L> {
    /// Обучающий цикл: эпохи до сходимости или исчерпания предела.
    ///
    /// Каждые `batch_size` эпох средняя ошибка батча сравнивается с порогом
    /// `min_error`; при достижении порога обучение останавливается сразу.
    fn train(&self, network: &mut Network) -> Result<TrainingOutcome, TrainingError> {
        if !network.has_been_built() {
            return Err(TrainingError::NotBuilt);
        }

        let mut batch_sum = 0.0f32;
        let mut batch_len = 0usize;
        let mut batch_loss = None;
        let mut converged = false;
        let mut epochs = 0usize;

        for epoch in 0..self.data.max_epochs() {
            let loss = self.run_epoch(network, epoch)?;
            epochs = epoch + 1;

            batch_sum += loss;
            batch_len += 1;
            if batch_len == self.batch_size {
                let average = batch_sum / self.batch_size as f32;
                batch_loss = Some(average);
                debug!(epoch, batch_loss = average, "batch complete");

                if average < self.data.min_error() {
                    converged = true;
                    break;
                }
                batch_sum = 0.0;
                batch_len = 0;
            }
        }

        info!(epochs, converged, ?batch_loss, "training finished");
        Ok(TrainingOutcome {
            epochs,
            batch_loss,
            converged,
        })
    }
}
