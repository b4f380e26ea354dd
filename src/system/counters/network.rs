use tracing::debug;

/// Byte counters summed over every interface in `/proc/net/dev`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NetworkSample {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub interfaces: usize,
}

/// Parses the contents of `/proc/net/dev`.
///
/// The two header lines carry no `iface:` prefix and fall out naturally.
pub fn parse_net_dev(contents: &str) -> NetworkSample {
    let mut sample = NetworkSample::default();

    for line in contents.lines() {
        let Some((iface, stats)) = line.split_once(':') else {
            continue;
        };
        let fields = stats
            .split_whitespace()
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>();
        // receive block is 8 columns wide; transmit bytes is the 9th column.
        let (rx, tx) = match fields.as_deref() {
            Ok([rx, _, _, _, _, _, _, _, tx, ..]) => (*rx, *tx),
            _ => {
                debug!(iface = iface.trim(), "skipping malformed interface line");
                continue;
            }
        };
        sample.rx_bytes = sample.rx_bytes.saturating_add(rx);
        sample.tx_bytes = sample.tx_bytes.saturating_add(tx);
        sample.interfaces += 1;
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  123456     100    0    0    0     0          0         0   123456     100    0    0    0     0       0          0
  eth0: 9876543    7000    0    0    0     0          0        12  1234567    5000    0    0    0     0       0          0
";

    #[test]
    fn sums_all_interfaces() {
        let sample = parse_net_dev(NET_DEV);
        assert_eq!(sample.interfaces, 2);
        assert_eq!(sample.rx_bytes, 123_456 + 9_876_543);
        assert_eq!(sample.tx_bytes, 123_456 + 1_234_567);
    }

    #[test]
    fn short_interface_line_is_skipped() {
        let contents = format!("{NET_DEV}  wlan0: 1 2 3\n");
        assert_eq!(parse_net_dev(&contents).interfaces, 2);
    }

    #[test]
    fn packed_counters_after_colon_are_parsed() {
        // large counters run into the colon with no padding.
        let sample = parse_net_dev("eth1:4294967296 1 0 0 0 0 0 0 10 1 0 0 0 0 0 0\n");
        assert_eq!(sample.rx_bytes, 4_294_967_296);
        assert_eq!(sample.tx_bytes, 10);
    }
}
