use clap::Parser;
use glam::vec3;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use smallvec::SmallVec;
use std::time::{Duration, Instant};

use blockcaster::{
    renderer::{
        Billboard, DEFAULT_HEIGHT, DEFAULT_WIDTH, Passes, RenderConfig, RendererExt, Rgba,
        Software, Surface, TRANSPARENT,
    },
    world::{BlockGrid, CameraState, LevelGrid, Texture, TextureBank},
};

const MAP: &str = "
################
#..............#
#..2.......3...#
#..2...........#
#......##......#
#......##......#
#..............#
#...3......2...#
#..............#
#####....#######
#..............#
#..1........1..#
#..............#
################
";

/// Height of the strip under the 3-D view.
const STATUS_BAR: usize = 16;
const STATUS_COLOUR: Rgba = 0x00_303030;

/// Cells per tic at walking pace; running doubles it.
const WALK_SPEED: f32 = 0.06;
const TURN_SPEED: f32 = 0.05;
/// Keep this far (cells) from solid blocks.
const PLAYER_RADIUS: f32 = 0.2;

/// Interactive software-rendered walk-through of a built-in map.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Render width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Render height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Window scale factor (1, 2, 4 or 8)
    #[arg(long, default_value_t = 2)]
    scale: u8,

    /// Near clip distance in cells
    #[arg(long, default_value_t = 0.125)]
    near: f32,

    /// Shading constant K in `brightness = K / depth`
    #[arg(long, default_value_t = 5000.0)]
    shade: f32,
}

fn window_scale(n: u8) -> Scale {
    match n {
        0 | 1 => Scale::X1,
        2 | 3 => Scale::X2,
        4..=7 => Scale::X4,
        _ => Scale::X8,
    }
}

/// Round marker on a transparent background.
fn orb_sprite(size: usize, colour: Rgba) -> Vec<Rgba> {
    let r = size as f32 * 0.5;
    (0..size * size)
        .map(|i| {
            let dx = (i % size) as f32 + 0.5 - r;
            let dy = (i / size) as f32 + 0.5 - r;
            if dx * dx + dy * dy <= r * r { colour } else { TRANSPARENT }
        })
        .collect()
}

/// `true` if a player disc at `(x, z)` overlaps no solid block.
fn walkable<G: LevelGrid>(grid: &G, x: f32, z: f32) -> bool {
    [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
        .iter()
        .all(|&(sx, sz)| {
            let col = (x + sx * PLAYER_RADIUS).floor() as i32;
            let row = (z + sz * PLAYER_RADIUS).floor() as i32;
            !grid.is_solid(col, row)
        })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let mut bank = TextureBank::default_with_checker();
    let walls = [
        bank.insert("BRICK", Texture::bricks(64, 0x00_8C3A2A, 0x00_A09A90))?,
        bank.insert("STONE", Texture::checker(64, 0x00_707070, 0x00_5A5A5A, 16))?,
        bank.insert("MOSS", Texture::bricks(64, 0x00_3E6B3A, 0x00_2A2A2A))?,
        bank.insert("SLATE", Texture::solid(64, 0x00_4A5A7A))?,
    ];
    let floor = bank.insert("FLOOR", Texture::checker(64, 0x00_6A5A40, 0x00_5A4A34, 32))?;
    let ceiling = bank.insert("CEILING", Texture::solid(64, 0x00_505868))?;

    let grid = BlockGrid::from_ascii(MAP, &walls)?.with_boundary_texture(walls[1]);
    Software::validate_grid(&grid, &bank)?;

    let config = RenderConfig {
        near_clip: opts.near,
        shade_constant: opts.shade,
        ..RenderConfig::default()
    }
    .with_size(opts.width, opts.height)
    .with_flats(floor, ceiling);
    let mut renderer = Software::new(config, &bank)?;

    let orbs = [
        orb_sprite(32, 0x00_FFD040),
        orb_sprite(32, 0x00_40D0FF),
        orb_sprite(16, 0x00_FF4060),
    ];
    let sprite_spots = [
        (vec3(5.5, 0.4, 3.5), 0),
        (vec3(11.5, 0.4, 7.5), 1),
        (vec3(7.5, 0.3, 11.5), 2),
        (vec3(12.5, 0.4, 2.5), 0),
    ];

    let mut camera = CameraState::new(2.5, 1.5, 0.0);

    let (win_w, win_h) = (opts.width, opts.height + STATUS_BAR);
    let mut screen = Surface::new(win_w, win_h);
    let mut win = Window::new(
        "Blockcaster Software Render",
        win_w,
        win_h,
        WindowOptions {
            scale: window_scale(opts.scale),
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(35);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut tic = 0u32;

    const PASS_KEYS: [(Key, Passes); 4] = [
        (Key::F1, Passes::FLOOR),
        (Key::F2, Passes::WALLS),
        (Key::F3, Passes::SPRITES),
        (Key::F4, Passes::SHADE),
    ];

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* pass toggles ----------------------------------------------------- */
        for (key, pass) in PASS_KEYS {
            if win.is_key_pressed(key, KeyRepeat::No) {
                let mut passes = renderer.config().passes;
                passes.toggle(pass);
                renderer.set_passes(passes);
                println!("passes: {passes:?}");
            }
        }

        /* movement --------------------------------------------------------- */
        let mut forward = 0.0;
        let mut side = 0.0;
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            side -= 1.0;
        }
        if win.is_key_down(Key::D) {
            side += 1.0;
        }
        if win.is_key_down(Key::Left) {
            camera.turn(-TURN_SPEED);
        }
        if win.is_key_down(Key::Right) {
            camera.turn(TURN_SPEED);
        }

        let moving = forward != 0.0 || side != 0.0;
        camera.running = moving
            && (win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift));
        camera.walking = moving;
        let speed = if camera.running { WALK_SPEED * 2.0 } else { WALK_SPEED };

        // try each axis separately so walls can be slid along
        let mut next = camera;
        next.step(forward * speed, side * speed);
        if walkable(&grid, next.x, camera.z) {
            camera.x = next.x;
        }
        if walkable(&grid, camera.x, next.z) {
            camera.z = next.z;
        }
        camera.tick();
        tic = tic.wrapping_add(1);

        /* sprites ---------------------------------------------------------- */
        let billboards: SmallVec<[Billboard<'_>; 8]> = sprite_spots
            .iter()
            .enumerate()
            .map(|(i, &(pos, orb))| {
                let hover = ((tic as f32 + i as f32 * 9.0) / 10.0).sin() * 0.05;
                let px = &orbs[orb];
                let size = (px.len() as f32).sqrt() as usize;
                Billboard::new(pos, px, size, size).with_offset(hover)
            })
            .collect();

        /* draw ------------------------------------------------------------- */
        screen.fill(STATUS_COLOUR);
        renderer.render_into(&camera, &grid, &billboards, &bank, &mut screen, 0, 0);
        acc_time += t0.elapsed();
        acc_frames += 1;
        win.update_with_buffer(screen.pixels(), win_w, win_h)?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            println!(
                "avg render: {:.2} ms  ({:.1} FPS)  {:?}",
                avg_ms,
                fps,
                renderer.stats()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
