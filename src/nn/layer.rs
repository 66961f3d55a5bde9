//! Модуль, реализующий один слой полносвязной сети.
//!
//! Слой владеет матрицей весов формы `(число нейронов, число входов + 1)`:
//! строка соответствует нейрону, последний столбец — вес смещения (bias).
//! При активации к входному вектору добавляется константа 1.0, поэтому
//! вызывающий код передает входы без смещения.
//!
//! Помимо весов слой хранит рабочее состояние последнего прохода:
//! `inputs`, `outputs` и `derivatives` перезаписываются каждым прямым
//! проходом, `gradients` — обратным, `deltas` — обновлением весов.
//! Буферы перезаписываются на месте и не освобождаются между вызовами.

use crate::nn::{Activation, NetworkError, NnResult};
use ndarray::{s, Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use std::fmt;

/// Один слой нейронов с общей функцией активации и единой матрицей весов.
#[derive(Debug)]
pub struct Layer {
    /// Матрица весов: строка — нейрон, последний столбец — смещение.
    input_weights: Array2<f32>,
    activation: Activation,
    /// Индексы соседних слоев в последовательности, которой владеет сеть.
    /// Это слабые ссылки: слой никогда не владеет соседями.
    input_layer: Option<usize>,
    output_layer: Option<usize>,
    // Рабочее состояние. Перезаписывается на месте, никогда не сбрасывается
    // отдельно от очередного прохода.
    inputs: Option<Array1<f32>>,
    outputs: Option<Array1<f32>>,
    derivatives: Option<Array1<f32>>,
    gradients: Option<Array1<f32>>,
    deltas: Option<Array2<f32>>,
}

impl Layer {
    /// Создает слой из готовой матрицы весов.
    ///
    /// Матрица должна быть непустой; форма `(n, m + 1)` задает слой из `n`
    /// нейронов с `m` входами.
    pub fn new(input_weights: Array2<f32>, activation: Activation) -> NnResult<Self> {
        if input_weights.nrows() == 0 || input_weights.ncols() == 0 {
            return Err(NetworkError::EmptyWeights);
        }

        Ok(Self {
            input_weights,
            activation,
            input_layer: None,
            output_layer: None,
            inputs: None,
            outputs: None,
            derivatives: None,
            gradients: None,
            deltas: None,
        })
    }

    /// Создает слой со случайными весами, равномерными в `[min, max)`.
    ///
    /// К `inputs` добавляется столбец смещения, так что итоговая матрица
    /// имеет форму `(neurons, inputs + 1)`.
    pub fn random(
        neurons: usize,
        inputs: usize,
        min: f32,
        max: f32,
        activation: Activation,
    ) -> NnResult<Self> {
        Self::random_using(neurons, inputs, min, max, activation, &mut rand::thread_rng())
    }

    /// Вариант [`Layer::random`] с внешним генератором, для воспроизводимой
    /// инициализации.
    pub fn random_using<R: Rng + ?Sized>(
        neurons: usize,
        inputs: usize,
        min: f32,
        max: f32,
        activation: Activation,
        rng: &mut R,
    ) -> NnResult<Self> {
        if neurons == 0 {
            return Err(NetworkError::NoNeurons);
        }
        if inputs == 0 {
            return Err(NetworkError::NoInputs);
        }
        if min >= max {
            return Err(NetworkError::InvalidWeightRange { min, max });
        }

        let weights = Array2::random_using((neurons, inputs + 1), Uniform::new(min, max), rng);
        Self::new(weights, activation)
    }

    /// Число нейронов слоя (строк матрицы весов).
    pub fn neuron_count(&self) -> usize {
        self.input_weights.nrows()
    }

    /// Число входов слоя, без учета смещения.
    pub fn input_count(&self) -> usize {
        self.input_weights.ncols() - 1
    }

    pub fn input_weights(&self) -> &Array2<f32> {
        &self.input_weights
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Индекс предыдущего слоя в цепочке, если он есть.
    pub fn input_layer(&self) -> Option<usize> {
        self.input_layer
    }

    /// Индекс следующего слоя в цепочке, если он есть.
    pub fn output_layer(&self) -> Option<usize> {
        self.output_layer
    }

    /// Выходы последнего прямого прохода.
    pub fn outputs(&self) -> Option<&Array1<f32>> {
        self.outputs.as_ref()
    }

    /// Входы последнего прямого прохода (без смещения).
    pub fn inputs(&self) -> Option<&Array1<f32>> {
        self.inputs.as_ref()
    }

    /// Производные активации, вычисленные последним прямым проходом.
    pub fn derivatives(&self) -> Option<&Array1<f32>> {
        self.derivatives.as_ref()
    }

    /// Градиенты ошибки по нейронам, вычисленные обратным проходом.
    pub fn gradients(&self) -> Option<&Array1<f32>> {
        self.gradients.as_ref()
    }

    /// Дельта весов предыдущей эпохи, используемая членом импульса.
    pub fn deltas(&self) -> Option<&Array2<f32>> {
        self.deltas.as_ref()
    }

    pub(crate) fn set_input_layer(&mut self, index: Option<usize>) {
        self.input_layer = index;
    }

    pub(crate) fn set_output_layer(&mut self, index: Option<usize>) {
        self.output_layer = index;
    }

    /// Прямой проход слоя.
    ///
    /// К `inputs` добавляется константа 1.0, произведение с матрицей весов
    /// дает по одной пре-активации на нейрон, к каждой применяется функция
    /// активации. Перезаписывает `inputs`, `outputs` и `derivatives`.
    pub fn activate(&mut self, inputs: &Array1<f32>) -> NnResult<()> {
        if inputs.is_empty() {
            return Err(NetworkError::EmptyInputs);
        }
        if inputs.len() != self.input_count() {
            return Err(NetworkError::InputLengthMismatch {
                expected: self.input_count(),
                got: inputs.len(),
            });
        }

        let augmented = augment(inputs);
        let pre_activations = self.input_weights.dot(&augmented);

        let mut outputs = Array1::zeros(self.neuron_count());
        let mut derivatives = Array1::zeros(self.neuron_count());
        for (neuron, &pre_activation) in pre_activations.iter().enumerate() {
            let (value, derivative) = self.activation.activate(pre_activation);
            outputs[neuron] = value;
            derivatives[neuron] = derivative;
        }

        store_vector(&mut self.inputs, inputs.to_owned());
        store_vector(&mut self.outputs, outputs);
        store_vector(&mut self.derivatives, derivatives);
        Ok(())
    }

    /// Прямой проход, берущий входы из выходов предыдущего слоя.
    ///
    /// Первый слой цепочки всегда активируется явными входами через
    /// [`Layer::activate`]; этот вариант используется для всех остальных.
    pub fn activate_from(&mut self, previous: &Layer) -> NnResult<()> {
        let inputs = previous
            .outputs()
            .ok_or(NetworkError::NoPreviousOutputs)?;
        self.activate(inputs)
    }

    /// Входной вектор последнего прохода с добавленной единицей смещения.
    pub(crate) fn bias_augmented_inputs(&self) -> NnResult<Array1<f32>> {
        let inputs = self.inputs.as_ref().ok_or(NetworkError::NotActivated)?;
        Ok(augment(inputs))
    }

    pub(crate) fn set_gradients(&mut self, gradients: Array1<f32>) {
        store_vector(&mut self.gradients, gradients);
    }

    /// Применяет обновление весов эпохи.
    ///
    /// `W = W + new_delta + deltas * momentum`; затем `new_delta` занимает
    /// место `deltas` для члена импульса следующей эпохи. Отсутствующая
    /// предыдущая дельта эквивалентна нулевой матрице.
    pub(crate) fn apply_delta(&mut self, new_delta: Array2<f32>, momentum: f32) {
        if let Some(previous) = &self.deltas {
            self.input_weights.scaled_add(momentum, previous);
        }
        self.input_weights += &new_delta;
        store_matrix(&mut self.deltas, new_delta);
    }
}

impl Clone for Layer {
    /// Копирует структуру слоя: веса и активацию, без рабочего состояния
    /// и без связей с соседями.
    fn clone(&self) -> Self {
        Self {
            input_weights: self.input_weights.clone(),
            activation: self.activation,
            input_layer: None,
            output_layer: None,
            inputs: None,
            outputs: None,
            derivatives: None,
            gradients: None,
            deltas: None,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.input_weights.rows() {
            for weight in row {
                write!(f, "{weight:>10.4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Добавляет к входному вектору константу смещения 1.0.
fn augment(inputs: &Array1<f32>) -> Array1<f32> {
    let mut augmented = Array1::ones(inputs.len() + 1);
    augmented.slice_mut(s![..inputs.len()]).assign(inputs);
    augmented
}

fn store_vector(slot: &mut Option<Array1<f32>>, values: Array1<f32>) {
    match slot {
        Some(buffer) => buffer.assign(&values),
        None => *slot = Some(values),
    }
}

fn store_matrix(slot: &mut Option<Array2<f32>>, values: Array2<f32>) {
    match slot {
        Some(buffer) => buffer.assign(&values),
        None => *slot = Some(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_keeps_shape() {
        let weights: Array2<f32> = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let layer = Layer::new(weights.clone(), Activation::Linear).unwrap();

        assert_eq!(layer.neuron_count(), 2);
        assert_eq!(layer.input_count(), 2);
        assert_eq!(layer.input_weights(), &weights);
    }

    #[test]
    fn test_create_rejects_empty_weights() {
        let weights = Array2::<f32>::zeros((0, 0));
        assert_eq!(
            Layer::new(weights, Activation::Linear).unwrap_err(),
            NetworkError::EmptyWeights
        );
    }

    #[test]
    fn test_random_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer =
            Layer::random_using(10, 2, -0.5, 0.75, Activation::Linear, &mut rng).unwrap();

        assert_eq!(layer.input_weights().dim(), (10, 3));
        assert!(layer
            .input_weights()
            .iter()
            .all(|&weight| (-0.5..0.75).contains(&weight)));
    }

    #[test]
    fn test_random_rejects_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Layer::random_using(0, 2, -1.0, 1.0, Activation::Linear, &mut rng).unwrap_err(),
            NetworkError::NoNeurons
        );
        assert_eq!(
            Layer::random_using(2, 0, -1.0, 1.0, Activation::Linear, &mut rng).unwrap_err(),
            NetworkError::NoInputs
        );
        assert_eq!(
            Layer::random_using(2, 2, 1.0, 1.0, Activation::Linear, &mut rng).unwrap_err(),
            NetworkError::InvalidWeightRange { min: 1.0, max: 1.0 }
        );
    }

    #[test]
    fn test_activate_appends_bias_last() {
        // Строка [1, 2, 3] на входах [1, 2]: 1*1 + 2*2 + 3 = 8.
        let mut first = Layer::new(
            arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
            Activation::Linear,
        )
        .unwrap();
        let mut second = Layer::new(arr2(&[[7.0, 8.0, 9.0]]), Activation::Linear).unwrap();

        first.activate(&arr1(&[1.0, 2.0])).unwrap();
        assert_eq!(first.outputs().unwrap(), &arr1(&[8.0, 20.0]));

        second.activate_from(&first).unwrap();
        assert_eq!(second.outputs().unwrap(), &arr1(&[225.0]));
    }

    #[test]
    fn test_activate_is_deterministic() {
        let mut layer = Layer::new(arr2(&[[0.3, -0.2, 0.1]]), Activation::Sigmoid).unwrap();
        let inputs = arr1(&[0.5, -1.5]);

        layer.activate(&inputs).unwrap();
        let first_outputs = layer.outputs().unwrap().clone();
        let first_derivatives = layer.derivatives().unwrap().clone();

        layer.activate(&inputs).unwrap();
        assert_eq!(layer.outputs().unwrap(), &first_outputs);
        assert_eq!(layer.derivatives().unwrap(), &first_derivatives);
    }

    #[test]
    fn test_activate_rejects_wrong_length() {
        let mut layer = Layer::new(arr2(&[[1.0, 2.0, 3.0]]), Activation::Linear).unwrap();
        assert_eq!(
            layer.activate(&arr1(&[1.0])).unwrap_err(),
            NetworkError::InputLengthMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_activate_from_requires_previous_outputs() {
        let first = Layer::new(arr2(&[[1.0, 2.0, 3.0]]), Activation::Linear).unwrap();
        let mut second = Layer::new(arr2(&[[1.0, 2.0]]), Activation::Linear).unwrap();

        assert_eq!(
            second.activate_from(&first).unwrap_err(),
            NetworkError::NoPreviousOutputs
        );
    }

    #[test]
    fn test_clone_resets_transient_state() {
        let mut layer = Layer::new(arr2(&[[1.0, 2.0, 3.0]]), Activation::Linear).unwrap();
        layer.activate(&arr1(&[1.0, 2.0])).unwrap();

        let copy = layer.clone();
        assert_eq!(copy.input_weights(), layer.input_weights());
        assert!(copy.outputs().is_none());
        assert!(copy.inputs().is_none());
    }
}
