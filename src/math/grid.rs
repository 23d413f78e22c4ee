/// `count` 個等距點，涵蓋 [start, end]；首尾恰為 start 與 end。
///
/// `count == 1` 時只回傳 start，`count == 0` 時回傳空向量。
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let intervals = (count - 1) as f64;
            let span = end - start;
            let mut grid: Vec<f64> = if span.is_finite() {
                let step = span / intervals;
                (0..count).map(|i| start + i as f64 * step).collect()
            } else {
                // 跨度溢位時改以兩端加權平均，各項皆不超過 |start|、|end|
                (0..count)
                    .map(|i| {
                        let t = i as f64 / intervals;
                        start * (1.0 - t) + end * t
                    })
                    .collect()
            };
            grid[0] = start;
            grid[count - 1] = end;
            grid
        }
    }
}
