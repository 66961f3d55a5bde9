//! Модуль, реализующий сеть — упорядоченную цепочку слоев.
//!
//! Сеть единолично владеет своими слоями. Перед запуском она должна быть
//! построена: `build` связывает каждую соседнюю пару слоев слабыми ссылками
//! (индексами). Добавление слоя после построения сбрасывает флаг, и сеть
//! требует повторного `build`.

use crate::nn::{Layer, NetworkError, NnResult};
use ndarray::Array1;
use std::fmt;

/// Цепочка слоев с жизненным циклом "создать -> построить -> запустить".
#[derive(Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
    outputs: Option<Array1<f32>>,
    has_been_built: bool,
    has_run: bool,
}

impl Network {
    /// Создает пустую сеть.
    pub fn new() -> Self {
        Self::default()
    }

    /// Создает сеть из готового списка слоев.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        let mut network = Self::new();
        network.add_layers(layers);
        network
    }

    /// Добавляет слой в конец цепочки и сбрасывает флаг построения.
    pub fn add_layer(&mut self, layer: Layer) -> &mut Self {
        self.has_been_built = false;
        self.layers.push(layer);
        self
    }

    /// Добавляет несколько слоев по порядку.
    pub fn add_layers(&mut self, layers: Vec<Layer>) -> &mut Self {
        for layer in layers {
            self.add_layer(layer);
        }
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn has_been_built(&self) -> bool {
        self.has_been_built
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Строит цепочку: связывает каждую соседнюю пару слоев.
    ///
    /// Повторный вызов для уже построенной сети ничего не меняет.
    pub fn build(&mut self) -> NnResult<&mut Self> {
        if self.has_been_built {
            return Ok(self);
        }
        if self.layers.is_empty() {
            return Err(NetworkError::NoLayers);
        }

        for layer in &mut self.layers {
            layer.set_input_layer(None);
            layer.set_output_layer(None);
        }
        for index in 1..self.layers.len() {
            self.layers[index - 1].set_output_layer(Some(index));
            self.layers[index].set_input_layer(Some(index - 1));
        }

        self.has_been_built = true;
        Ok(self)
    }

    /// Прогоняет входной вектор через всю цепочку.
    ///
    /// Первый слой активируется явными входами, каждый следующий — выходами
    /// предшественника. Выходы последнего слоя сохраняются как результат
    /// сети.
    pub fn run(&mut self, inputs: &Array1<f32>) -> NnResult<()> {
        if !self.has_been_built {
            return Err(NetworkError::NotBuilt);
        }
        if inputs.is_empty() {
            return Err(NetworkError::EmptyInputs);
        }

        self.layers[0].activate(inputs)?;
        for index in 1..self.layers.len() {
            let (activated, remaining) = self.layers.split_at_mut(index);
            remaining[0].activate_from(&activated[index - 1])?;
        }

        let last = self.layers.last().ok_or(NetworkError::NoLayers)?;
        let outputs = last.outputs().ok_or(NetworkError::NotActivated)?.to_owned();
        self.outputs = Some(outputs);
        self.has_run = true;
        Ok(())
    }

    /// Выходной вектор последнего запуска.
    pub fn outputs(&self) -> NnResult<&Array1<f32>> {
        if !self.has_run {
            return Err(NetworkError::NotRun);
        }
        self.outputs.as_ref().ok_or(NetworkError::NotRun)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            write!(f, "{layer}")?;
            writeln!(f, "{:>10}", "|")?;
        }
        Ok(())
    }
}
