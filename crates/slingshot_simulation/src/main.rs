//! Headless прогон SLINGSHOT
//!
//! Запускает Bevy App без рендера: уровень строится, блоки оседают,
//! полезно для проверки детерминизма и профилирования физики.

use slingshot_simulation::{create_headless_app, GamePlugin};

fn main() {
    let seed = 42;
    println!("Starting SLINGSHOT headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(GamePlugin);

    // 600 тиков = 10 секунд игрового времени
    for tick in 0..600 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}
