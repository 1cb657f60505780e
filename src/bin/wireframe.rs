use std::{process::ExitCode, time::Instant};
use wiretga::{io::load_obj, Color, Renderer, RendererConfig};

const USAGE: &str = "usage: wireframe [--size N] [--width N] [--height N] [--color R,G,B] [--raw|--rle] [INPUT.obj] [OUTPUT.tga]";

#[derive(Debug)]
struct Cli {
    input: String,
    output: String,
    config: RendererConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match parse_cli(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();
    let mesh = match load_obj(&cli.input) {
        Ok(mesh) => mesh,
        Err(err) => {
            log::error!("failed to load {}: {err}", cli.input);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "loaded {} ({} vertices, {} faces) in {:?}",
        cli.input,
        mesh.vertex_count(),
        mesh.face_count(),
        start.elapsed()
    );

    let renderer = Renderer::new(cli.config);
    if let Err(err) = renderer.render_to_file(&mesh, &cli.output) {
        log::error!("failed to render {}: {err}", cli.output);
        return ExitCode::FAILURE;
    }
    log::info!("wrote {} in {:?}", cli.output, start.elapsed());
    ExitCode::SUCCESS
}

fn parse_cli(args: impl IntoIterator<Item = String>) -> Result<Cli, String> {
    let args: Vec<String> = args.into_iter().collect();
    let mut config = RendererConfig::default();
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        let (flag, inline) = match a.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
            _ => (a, None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            if let Some(v) = inline.clone() {
                return Ok(v);
            }
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("missing value for {name}"))
        };

        match flag {
            "--raw" => config = config.with_rle(false),
            "--rle" => config = config.with_rle(true),
            "--size" => {
                let n = parse_dim(&value(flag)?)?;
                config = config.with_size(n, n);
            }
            "--width" => {
                let w = parse_dim(&value(flag)?)?;
                let h = config.height();
                config = config.with_size(w, h);
            }
            "--height" => {
                let h = parse_dim(&value(flag)?)?;
                let w = config.width();
                config = config.with_size(w, h);
            }
            "--color" => {
                let v = value(flag)?;
                let c = Color::parse(&v).ok_or_else(|| format!("invalid color `{v}`"))?;
                config = config.with_color(c);
            }
            _ if a.starts_with("--") => return Err(format!("unknown option `{a}`")),
            _ => positional.push(a.to_string()),
        }
        i += 1;
    }

    if positional.len() > 2 {
        return Err("too many arguments".to_string());
    }
    let mut positional = positional.into_iter();
    Ok(Cli {
        input: positional
            .next()
            .unwrap_or_else(|| "obj/african_head.obj".to_string()),
        output: positional.next().unwrap_or_else(|| "output.tga".to_string()),
        config,
    })
}

fn parse_dim(s: &str) -> Result<i32, String> {
    match s.parse::<i32>() {
        Ok(n) if n > 0 && n <= i32::from(i16::MAX) => Ok(n),
        _ => Err(format!("invalid dimension `{s}`")),
    }
}
