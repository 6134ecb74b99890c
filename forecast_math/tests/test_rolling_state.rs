use approx::assert_relative_eq;
use forecast_math::{
    least_squares_slope, mean, pct_change, CumulativeTrace, MinMaxScaler, RollingWindow, Scaler,
};

#[test]
fn test_window_and_trace_stay_aligned() {
    let window = RollingWindow::new(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0]).unwrap();
    let mut trace = CumulativeTrace::from_window(&window);
    let mut window = window;

    for prediction in [20.0, 21.0, 19.0, 0.0, 5.0] {
        window = window.advanced(prediction);
        trace = trace.advanced(prediction);

        assert_eq!(window.len(), 6);
        assert_eq!(trace.len(), 6);

        // Each running sum grows by the window value at the same position
        let sums = trace.to_vec();
        let values = window.to_vec();
        for i in 1..sums.len() {
            assert_relative_eq!(sums[i] - sums[i - 1], values[i]);
        }
    }
}

#[test]
fn test_lag_features_from_window() {
    let window = RollingWindow::new(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0]).unwrap();
    let lags = window.lags(3).unwrap();

    assert_eq!(lags, vec![16.0, 14.0, 13.0]);
    assert_relative_eq!(mean(&lags).unwrap(), 43.0 / 3.0);
    assert_relative_eq!(pct_change(lags[0], lags[1]), 2.0 / 14.0);
    assert_eq!(pct_change(5.0, 0.0), 0.0);
}

#[test]
fn test_slope_of_linear_trace() {
    let slope = least_squares_slope(&[3.0, 5.0, 7.0, 9.0]).unwrap();
    assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
}

#[test]
fn test_scaler_round_trip_through_window() {
    let scaler = MinMaxScaler::fit(&[0.0, 50.0, 200.0]).unwrap();
    let scaled = scaler.transform(&[50.0, 100.0]).unwrap();

    assert_relative_eq!(scaled[0], 0.25, epsilon = 1e-12);
    assert_relative_eq!(scaled[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(scaler.inverse_transform_one(0.75).unwrap(), 150.0, epsilon = 1e-9);
}
