//! Overlap resolution: deciding how many columns a group of events needs and
//! which column each event takes.

use crate::model::{Event, LayoutSlot};

/// Computes one [`LayoutSlot`] per input event, in input order.
pub trait OverlapResolver: Send + Sync {
    fn calculate_positions(&self, events: &[Event]) -> Vec<LayoutSlot>;
}

impl<F> OverlapResolver for F
where
    F: Fn(&[Event]) -> Vec<LayoutSlot> + Send + Sync,
{
    fn calculate_positions(&self, events: &[Event]) -> Vec<LayoutSlot> {
        self(events)
    }
}

/// Greedy column packing.
///
/// Events are visited by start time (ties keep input order) and grouped into
/// clusters of transitively overlapping events. Inside a cluster each event
/// takes the leftmost column that is free at its start time, and every member
/// reports the cluster's column count. Placeholders take part like any other
/// event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnResolver;

impl ColumnResolver {
    pub fn new() -> Self {
        ColumnResolver
    }
}

impl OverlapResolver for ColumnResolver {
    fn calculate_positions(&self, events: &[Event]) -> Vec<LayoutSlot> {
        let mut order: Vec<usize> = (0..events.len()).collect();
        order.sort_by_key(|&i| (events[i].starts_at, i));

        let mut slots: Vec<LayoutSlot> = (0..events.len())
            .map(|id| LayoutSlot {
                id,
                width_multiplier: 1,
                offset: 0,
            })
            .collect();

        let mut cluster: Vec<usize> = Vec::new();
        // End time of the last event placed in each column
        let mut column_ends: Vec<u64> = Vec::new();
        let mut cluster_end = 0u64;

        for i in order {
            let event = &events[i];
            let starts_at = u64::from(event.starts_at);
            if !cluster.is_empty() && starts_at >= cluster_end {
                close_cluster(&mut slots, &cluster, column_ends.len());
                cluster.clear();
                column_ends.clear();
                cluster_end = 0;
            }

            let column = match column_ends.iter().position(|&end| end <= starts_at) {
                Some(c) => {
                    column_ends[c] = event.ends_at();
                    c
                }
                None => {
                    column_ends.push(event.ends_at());
                    column_ends.len() - 1
                }
            };

            slots[i].offset = column as u32;
            cluster.push(i);
            cluster_end = cluster_end.max(event.ends_at());
        }
        close_cluster(&mut slots, &cluster, column_ends.len());

        slots
    }
}

fn close_cluster(slots: &mut [LayoutSlot], cluster: &[usize], columns: usize) {
    for &i in cluster {
        slots[i].width_multiplier = columns as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(events: &[Event]) -> Vec<(u32, u32)> {
        ColumnResolver
            .calculate_positions(events)
            .into_iter()
            .map(|s| (s.width_multiplier, s.offset))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_slots() {
        assert!(ColumnResolver.calculate_positions(&[]).is_empty());
    }

    #[test]
    fn disjoint_events_take_full_width() {
        let events = [Event::new(0, 60), Event::new(60, 30), Event::new(120, 15)];
        assert_eq!(columns(&events), vec![(1, 0), (1, 0), (1, 0)]);
    }

    #[test]
    fn two_overlapping_events_share_the_row() {
        let events = [Event::new(0, 60), Event::new(30, 60)];
        assert_eq!(columns(&events), vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn slots_keep_input_order() {
        let events = [Event::new(30, 60), Event::new(0, 60)];
        let slots = ColumnResolver.calculate_positions(&events);
        assert_eq!(slots[0].id, 0);
        assert_eq!(slots[1].id, 1);
        assert_eq!(slots[0].offset, 1);
        assert_eq!(slots[1].offset, 0);
    }

    #[test]
    fn freed_column_is_reused_within_cluster() {
        // a overlaps b, b overlaps c, a has ended when c starts
        let events = [Event::new(0, 60), Event::new(30, 60), Event::new(70, 30)];
        assert_eq!(columns(&events), vec![(2, 0), (2, 1), (2, 0)]);
    }

    #[test]
    fn concurrent_members_get_distinct_columns() {
        let events = [
            Event::new(60, 60),
            Event::new(70, 30),
            Event::new(110, 120),
            Event::new(115, 30),
            Event::new(200, 30),
            Event::new(220, 100),
            Event::new(310, 100),
        ];
        let slots = ColumnResolver.calculate_positions(&events);
        for (a, ea) in events.iter().enumerate() {
            for (b, eb) in events.iter().enumerate() {
                if a != b && ea.overlaps(eb) {
                    assert_eq!(slots[a].width_multiplier, slots[b].width_multiplier);
                    assert_ne!(slots[a].offset, slots[b].offset);
                }
            }
            assert!(slots[a].offset < slots[a].width_multiplier);
        }
    }

    #[test]
    fn placeholders_occupy_columns() {
        let events = [Event::new(0, 60).placeholder(), Event::new(0, 60)];
        assert_eq!(columns(&events), vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn events_ending_past_u32_minutes() {
        let events = [
            Event::new(u32::MAX - 10, 60),
            Event::new(u32::MAX - 5, 60),
            Event::new(0, 60),
        ];
        assert_eq!(columns(&events), vec![(2, 0), (2, 1), (1, 0)]);
    }

    #[test]
    fn closures_act_as_resolvers() {
        let fixed = |events: &[Event]| {
            (0..events.len())
                .map(|id| LayoutSlot {
                    id,
                    width_multiplier: 3,
                    offset: 2,
                })
                .collect::<Vec<_>>()
        };
        let slots = fixed.calculate_positions(&[Event::new(0, 1)]);
        assert_eq!(slots[0].width_multiplier, 3);
    }
}
