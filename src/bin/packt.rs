use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use packt_rust::packt_common_rs::packet::debug::PacketDebugLogger;
use packt_rust::packt_common_rs::utils::config_loader::{ConfigLoader, HeaderDefaults, OutputFormat};
use packt_rust::packt_common_rs::utils::log_config::init_logging;
use packt_rust::prelude::*;

#[derive(Parser)]
#[command(name = "packt")]
#[command(about = "Packt - ビットフィールドからパケットを組み立てて表示するツール")]
#[command(version = "0.1.0")]
struct Cli {
    /// 設定ファイル (.toml / .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 出力形式 (diagram, hex, both)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// デバッグモード
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IpArgs {
    /// 送信元アドレス
    #[arg(short = 's', long, default_value = "0.0.0.0")]
    src: String,

    /// 宛先アドレス
    #[arg(short = 'D', long, default_value = "0.0.0.0")]
    dst: String,

    /// TTL（省略時は設定値）
    #[arg(long)]
    ttl: Option<u8>,

    /// ペイロード文字列
    #[arg(long)]
    data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// IP + TCP パケット
    Tcp {
        #[command(flatten)]
        ip: IpArgs,

        /// 送信元ポート
        #[arg(long, default_value = "0")]
        sport: u16,

        /// 宛先ポート
        #[arg(long, default_value = "0")]
        dport: u16,

        /// フラグ (例: syn,ack)
        #[arg(long, default_value = "fin")]
        flags: TcpFlags,

        /// シーケンス番号
        #[arg(long, default_value = "0")]
        seq: u32,

        /// 確認応答番号
        #[arg(long, default_value = "0")]
        ack: u32,
    },
    /// IP + UDP パケット
    Udp {
        #[command(flatten)]
        ip: IpArgs,

        /// 送信元ポート
        #[arg(long, default_value = "0")]
        sport: u16,

        /// 宛先ポート
        #[arg(long, default_value = "0")]
        dport: u16,
    },
    /// IP + ICMP パケット
    Icmp {
        #[command(flatten)]
        ip: IpArgs,

        /// ICMPタイプ (8 = echo)
        #[arg(short = 't', long = "type", default_value = "8")]
        icmp_type: u8,

        /// ICMPコード
        #[arg(long, default_value = "0")]
        code: u8,
    },
}

fn build_ip_header(args: &IpArgs, defaults: &HeaderDefaults, protocol: IpProtocol) -> PacketResult<IpHeader> {
    let mut header = IpHeader::new();
    header.version = defaults.ip_version;
    header.header_len = defaults.header_len;
    header.ttl = args.ttl.unwrap_or(defaults.ttl);
    header.protocol = protocol.into();
    header.set_source_addr(&args.src)?;
    header.set_dest_addr(&args.dst)?;
    Ok(header)
}

fn print_packet<P: BasePacket + std::fmt::Display>(packet: &P, format: OutputFormat) {
    PacketDebugLogger::log_packet(packet);

    if matches!(format, OutputFormat::Diagram | OutputFormat::Both) {
        println!("{}", packet);
    }
    if matches!(format, OutputFormat::Hex | OutputFormat::Both) {
        println!("{} bits / {} bytes", packet.num_bits(), packet.num_bytes());
        println!("{}", hex::encode(packet.to_bytes()));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_paths(vec![path.clone()]),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if cli.debug {
        config.logging.level = "debug".into();
    }
    init_logging(&config.logging)?;

    let format = cli.output.unwrap_or(config.output.format);
    let defaults = &config.defaults;

    match cli.command {
        Commands::Tcp { ip, sport, dport, flags, seq, ack } => {
            let mut packet = TcpPacket::new();
            packet.ip_header(build_ip_header(&ip, defaults, IpProtocol::Tcp)?)?;

            let mut header = TcpHeader::new();
            header.source_port = sport;
            header.dest_port = dport;
            header.flags = flags;
            header.seq_num = seq;
            header.ack_num = ack;
            header.window = defaults.tcp_window;
            header.data_offset = defaults.tcp_data_offset;
            packet.tcp_header(header)?;

            if let Some(data) = ip.data.as_deref() {
                packet.data(data)?;
            }
            print_packet(&packet, format);
        }
        Commands::Udp { ip, sport, dport } => {
            let mut packet = UdpPacket::new();
            packet.ip_header(build_ip_header(&ip, defaults, IpProtocol::Udp)?)?;

            let mut header = UdpHeader::new();
            header.source_port = sport;
            header.dest_port = dport;
            packet.udp_header(header)?;

            if let Some(data) = ip.data.as_deref() {
                packet.data(data)?;
            }
            print_packet(&packet, format);
        }
        Commands::Icmp { ip, icmp_type, code } => {
            let mut packet = IcmpPacket::new();
            packet.ip_header(build_ip_header(&ip, defaults, IpProtocol::Icmp)?)?;

            let mut header = IcmpHeader::new();
            header.icmp_type = icmp_type;
            header.code = code;
            packet.icmp_header(header)?;

            if let Some(data) = ip.data.as_deref() {
                packet.data(data)?;
            }
            print_packet(&packet, format);
        }
    }

    Ok(())
}
