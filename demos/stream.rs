use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use serial_liveplot::handoff;
use serial_liveplot::{ConnectionState, Listeners, Plotter, PlotterConfig};
use tracing_subscriber::EnvFilter;

const LINES: usize = 400;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PlotterConfig::builder()
        .window_size(40)
        .max_cache(200)
        .smooth_line(true)
        .build()?;
    let plotter = Rc::new(RefCell::new(Plotter::new(config)));
    let mut listeners = Listeners::new();
    listeners.subscribe(Rc::clone(&plotter));

    let (sender, queue) = handoff::channel();
    let reader = thread::spawn(move || -> Result<(), serial_liveplot::HandoffError> {
        sender.send_status(ConnectionState::Connected)?;
        for step in 0..LINES {
            let t = step as f64 * 0.1;
            let line = format!("sin:{:.3},cos:{:.3},ramp:{step}\n", t.sin(), t.cos());
            // Split lines the way a UART read loop would.
            let (head, tail) = line.split_at(line.len() / 2);
            sender.send_data(head)?;
            sender.send_data(tail)?;
            if step == LINES / 2 {
                sender.send_error("simulated framing error")?;
            }
            thread::sleep(Duration::from_millis(1));
        }
        sender.send_status(ConnectionState::Disconnected)
    });

    let mut frames = 0;
    while !reader.is_finished() {
        if queue.drain(&mut listeners) > 0 {
            frames += 1;
        }
        thread::sleep(Duration::from_millis(16));
    }
    queue.drain(&mut listeners);
    reader.join().map_err(|_| "reader thread panicked")??;

    let mut plotter = plotter.borrow_mut();
    plotter.toggle_series("ramp");
    plotter.zoom(-2.0);
    let frame = plotter.frame();
    println!(
        "{} samples retained over {frames} frames, window {:.1}..{:.1}",
        plotter.data_point_count(),
        frame.x.min,
        frame.x.max
    );
    if let Some(y) = frame.y {
        println!("y axis {:.3}..{:.3}", y.min, y.max);
    }
    for series in &frame.series {
        println!("{:>4}: {} points", series.name, series.points.len());
    }
    Ok(())
}
