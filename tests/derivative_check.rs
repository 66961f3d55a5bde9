//! Интеграционный тест для проверки корректности производных активаций.
//!
//! Производная, которую возвращает `activate`, сравнивается с производной,
//! вычисленной двумя независимыми способами: по закрытой формуле и (для
//! гладких функций) по методу конечных разностей.

use rustymlp::nn::Activation;

const EPSILON: f32 = 1e-2;
const TOLERANCE: f32 = 1e-2;

/// Сравнивает два значения по относительной ошибке и паникует, если они
/// не близки.
fn assert_close(analytic: f32, numeric: f32, tolerance: f32, context: &str) {
    let diff = (analytic - numeric).abs();
    let larger = analytic.abs().max(numeric.abs());

    // Оба нулевые — совпадают.
    if larger == 0.0 {
        return;
    }

    let relative_error = diff / larger;
    if relative_error > tolerance {
        panic!(
            "Derivatives do not match at {}! Analytic: {:.6}, Numeric: {:.6}, Relative Error: {:.6}",
            context, analytic, numeric, relative_error
        );
    }
}

/// Точки выборки, включая ноль и обе границы вокруг него.
fn sample_points() -> Vec<f32> {
    let mut points: Vec<f32> = (-12..=12).map(|step| step as f32 * 0.25).collect();
    points.push(-1e-3);
    points.push(1e-3);
    points
}

/// Центральная конечная разность значения активации.
fn numeric_derivative(activation: Activation, x: f32) -> f32 {
    let (y_plus, _) = activation.activate(x + EPSILON);
    let (y_minus, _) = activation.activate(x - EPSILON);
    (y_plus - y_minus) / (2.0 * EPSILON)
}

#[test]
fn test_linear_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Linear.activate(x);
        assert_eq!(derivative, 1.0, "linear derivative at {x}");
    }
}

#[test]
fn test_binary_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Binary.activate(x);
        assert_eq!(derivative, 0.0, "binary derivative at {x}");
    }
}

#[test]
fn test_relu_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Relu.activate(x);
        let expected = if x >= 0.0 { 1.0 } else { 0.0 };
        assert_eq!(derivative, expected, "relu derivative at {x}");
    }
}

#[test]
fn test_leaky_relu_derivative_closed_form() {
    let activation = Activation::leaky_relu(0.01).unwrap();
    for x in sample_points() {
        let (_, derivative) = activation.activate(x);
        let expected = if x >= 0.0 { 1.0 } else { 0.01 };
        assert_eq!(derivative, expected, "leaky relu derivative at {x}");
    }
}

#[test]
fn test_elu_derivative_closed_form() {
    let activation = Activation::elu(1.0).unwrap();
    for x in sample_points() {
        let (_, derivative) = activation.activate(x);
        let expected = if x >= 0.0 { 1.0 } else { x.exp() };
        assert_close(derivative, expected, 1e-5, &format!("elu x = {x}"));
    }
}

#[test]
fn test_sigmoid_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Sigmoid.activate(x);
        let sigmoid = 1.0 / (1.0 + (-x).exp());
        assert_close(
            derivative,
            sigmoid * (1.0 - sigmoid),
            1e-5,
            &format!("sigmoid x = {x}"),
        );
    }
}

#[test]
fn test_tanh_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Tanh.activate(x);
        assert_close(
            derivative,
            1.0 - x.tanh() * x.tanh(),
            1e-5,
            &format!("tanh x = {x}"),
        );
    }
}

#[test]
fn test_swish_derivative_closed_form() {
    for x in sample_points() {
        let (_, derivative) = Activation::Swish.activate(x);
        let sigmoid = 1.0 / (1.0 + (-x).exp());
        let value = x * sigmoid;
        assert_close(
            derivative,
            value + sigmoid * (1.0 - value),
            1e-5,
            &format!("swish x = {x}"),
        );
    }
}

#[test]
fn test_smooth_derivatives_match_finite_differences() {
    // Гладкие функции: производная совпадает с конечной разностью во всех
    // точках выборки. ELU с alpha = 1 гладкая и в нуле.
    let smooth = [
        Activation::Linear,
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::Swish,
        Activation::elu(1.0).unwrap(),
    ];

    for activation in smooth {
        for x in sample_points() {
            let (_, analytic) = activation.activate(x);
            let numeric = numeric_derivative(activation, x);
            assert_close(
                analytic,
                numeric,
                TOLERANCE,
                &format!("{activation:?} x = {x}"),
            );
        }
    }
}

#[test]
fn test_derivative_evaluated_at_forward_point() {
    // Значение и производная всегда возвращаются одной парой из одного
    // вызова, поэтому повторная активация дает идентичный результат.
    let activation = Activation::Sigmoid;
    for x in sample_points() {
        assert_eq!(activation.activate(x), activation.activate(x));
    }
}
