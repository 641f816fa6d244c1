use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use wardbot_shared::codec::{parse_speak, LineDecoder};
use wardbot_shared::{wire, ActionGroup};

#[tokio::main]
async fn main() -> Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("127.0.0.1:{}", wire::DEFAULT_PORT));

    let stream = TcpStream::connect(&addr).await?;
    println!("Connected to wardbot at {}", addr);
    print_help();

    let (mut reader, mut writer) = stream.into_split();

    // Print robot notifications as they arrive
    tokio::spawn(async move {
        let mut decoder = LineDecoder::new();
        let mut buf = vec![0u8; 1024];

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => {
                    println!("Robot closed the connection");
                    std::process::exit(0);
                }
                Ok(n) => {
                    decoder.extend(&buf[..n]);
                    while let Ok(Some(line)) = decoder.decode_next() {
                        if let Some(text) = parse_speak(&line) {
                            println!("[ROBOT] {}", text);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Read error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    });

    // Forward typed command tokens to the robot
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        if token == "quit" || token == "exit" {
            break;
        }
        writer.write_all(format!("{token}\n").as_bytes()).await?;
    }

    Ok(())
}

fn print_help() {
    let moves: Vec<&str> = ActionGroup::ALL.iter().filter_map(|g| g.token()).collect();
    println!("Commands: patrol, stop patrol, quit");
    println!("Moves: {}", moves.join(", "));
}
