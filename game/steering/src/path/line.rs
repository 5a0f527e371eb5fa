use common::*;

use crate::path::{Path, PathParam};
use crate::vector::Vector;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("A path needs at least one waypoint")]
    NoWaypoints,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<V> {
    pub begin: V,
    pub end: V,
    pub length: f32,
    /// Arc length from the start of the path to [end]
    pub cumulative_length: f32,
}

/// Closed loop of straight segments through the waypoints, the last one leading back to the first
#[derive(Debug, Clone)]
pub struct LinePath<V> {
    segments: Vec<Segment<V>>,
    length: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePathParam<V> {
    pub segment_index: usize,
    pub distance: f32,
    /// Nearest point on the path found by the last distance query
    pub nearest_point: V,
}

impl<V: Vector> LinePath<V> {
    pub fn new(waypoints: &[V]) -> Result<Self, PathError> {
        if waypoints.is_empty() {
            return Err(PathError::NoWaypoints);
        }

        let mut cumulative_length = 0.0;
        let segments = waypoints
            .iter()
            .zip(waypoints.iter().cycle().skip(1))
            .map(|(&begin, &end)| {
                let length = begin.distance(end);
                cumulative_length += length;
                Segment {
                    begin,
                    end,
                    length,
                    cumulative_length,
                }
            })
            .collect_vec();

        Ok(Self {
            segments,
            length: cumulative_length,
        })
    }

    pub fn segments(&self) -> &[Segment<V>] {
        &self.segments
    }
}

impl<V: Copy> PathParam for LinePathParam<V> {
    fn distance(&self) -> f32 {
        self.distance
    }

    fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }
}

/// Nearest point to `point` on the segment from `a` to `b`
fn nearest_point_on_segment<V: Vector>(a: V, b: V, point: V) -> V {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return a;
    }

    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    a.add_scaled(ab, t)
}

impl<V: Vector> Path<V> for LinePath<V> {
    type Param = LinePathParam<V>;

    fn create_param(&self) -> Self::Param {
        LinePathParam {
            segment_index: 0,
            distance: 0.0,
            nearest_point: self.start_point(),
        }
    }

    fn length(&self) -> f32 {
        self.length
    }

    fn start_point(&self) -> V {
        self.segments[0].begin
    }

    fn end_point(&self) -> V {
        self.segments[self.segments.len() - 1].end
    }

    fn calculate_distance(&self, agent_position: V, param: &mut Self::Param) -> f32 {
        // segments is never empty. the first segment is the fallback when no distance
        // compares smaller, e.g. if it overflows to infinity
        let first = &self.segments[0];
        param.segment_index = 0;
        param.nearest_point = nearest_point_on_segment(first.begin, first.end, agent_position);
        let mut smallest = param.nearest_point.distance_squared(agent_position);

        for (i, segment) in self.segments.iter().enumerate().skip(1) {
            let nearest = nearest_point_on_segment(segment.begin, segment.end, agent_position);
            let distance_squared = nearest.distance_squared(agent_position);
            if distance_squared < smallest {
                smallest = distance_squared;
                param.segment_index = i;
                param.nearest_point = nearest;
            }
        }

        let segment = &self.segments[param.segment_index];
        let distance = segment.cumulative_length - param.nearest_point.distance(segment.end);
        param.set_distance(distance);
        distance
    }

    fn calculate_target_position(&self, _: &Self::Param, target_distance: f32) -> V {
        if self.length <= 0.0 {
            return self.start_point();
        }

        let target_distance = if target_distance < 0.0 || target_distance > self.length {
            target_distance.rem_euclid(self.length)
        } else {
            target_distance
        };

        let segment = self
            .segments
            .iter()
            .find(|s| s.cumulative_length >= target_distance)
            .unwrap_or_else(|| &self.segments[self.segments.len() - 1]);

        if segment.length <= 0.0 {
            return segment.end;
        }

        let remaining = segment.cumulative_length - target_distance;
        (segment.begin - segment.end) * (remaining / segment.length) + segment.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> LinePath<Vec2> {
        LinePath::new(&[
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ])
        .expect("non empty")
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(
            LinePath::<Vec2>::new(&[]).unwrap_err(),
            PathError::NoWaypoints
        );
    }

    #[test]
    fn path_is_closed() {
        let waypoints = [vec2(0.0, 0.0), vec2(3.0, 4.0), vec2(3.0, 10.0), vec2(-7.0, 2.0)];
        let path = LinePath::new(&waypoints).expect("non empty");
        let segments = path.segments();

        assert_eq!(segments.len(), waypoints.len());
        assert_eq!(segments[3].begin, waypoints[3]);
        assert_eq!(segments[3].end, waypoints[0]);

        let total: f32 = segments.iter().map(|s| s.length).sum();
        assert!(total.approx_eq(path.length(), (1e-4, 4)));
        assert!(segments[3]
            .cumulative_length
            .approx_eq(path.length(), (f32::EPSILON, 2)));
        assert!(segments
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.cumulative_length <= b.cumulative_length));
    }

    #[test]
    fn distance_of_point_on_path() {
        let path = square();
        let mut param = path.create_param();

        let distance = path.calculate_distance(vec2(10.0, 4.0), &mut param);
        assert!(distance.approx_eq(14.0, (1e-5, 4)));
        assert_eq!(param.segment_index, 1);
        assert_eq!(param.distance(), distance);

        // off the path, nearest is on the top edge
        let distance = path.calculate_distance(vec2(3.0, 12.0), &mut param);
        assert!(distance.approx_eq(27.0, (1e-5, 4)));
        assert_eq!(param.segment_index, 2);
        assert!(param.nearest_point.abs_diff_eq(vec2(3.0, 10.0), 1e-5));
    }

    #[test]
    fn ties_go_to_first_segment() {
        let path = square();
        let mut param = path.create_param();

        // shared corner between segments 0 and 1
        path.calculate_distance(vec2(12.0, -2.0), &mut param);
        assert_eq!(param.segment_index, 0);
    }

    #[test]
    fn target_wraps_around() {
        let path = square();
        let param = path.create_param();

        let at = |d: f32| path.calculate_target_position(&param, d);
        assert!(at(5.0).abs_diff_eq(vec2(5.0, 0.0), 1e-5));
        assert!(at(25.0).abs_diff_eq(vec2(5.0, 10.0), 1e-5));
        assert!(at(-5.0).abs_diff_eq(at(path.length() - 5.0), 1e-5));
        assert!(at(-5.0).abs_diff_eq(vec2(0.0, 5.0), 1e-5));
        assert!(at(45.0).abs_diff_eq(at(5.0), 1e-5));
        assert!(at(40.0).abs_diff_eq(vec2(0.0, 0.0), 1e-5));
    }

    #[test]
    fn single_waypoint() {
        let path = LinePath::new(&[vec2(3.0, 4.0)]).expect("non empty");
        let mut param = path.create_param();

        assert_eq!(path.length(), 0.0);
        assert_eq!(path.calculate_distance(vec2(100.0, 0.0), &mut param), 0.0);
        assert_eq!(path.calculate_target_position(&param, 12.0), vec2(3.0, 4.0));
    }

    #[test]
    fn overflowing_distance_falls_back_to_first_segment() {
        let path = square();
        let mut param = path.create_param();
        path.calculate_distance(vec2(3.0, 12.0), &mut param);
        assert_eq!(param.segment_index, 2);

        let distance = path.calculate_distance(vec2(1e30, 1e30), &mut param);
        assert_eq!(param.segment_index, 0);
        assert!(param.nearest_point.abs_diff_eq(vec2(10.0, 0.0), 1e-5));
        assert!(distance.approx_eq(10.0, (1e-5, 4)));
    }

    #[test]
    fn closed_path_in_3d() {
        let path = LinePath::new(&[
            vec3(0.0, 0.0, 0.0),
            vec3(3.0, 0.0, 4.0),
            vec3(3.0, 5.0, 4.0),
        ])
        .expect("non empty");
        let mut param = path.create_param();

        let distance = path.calculate_distance(vec3(3.0, 0.0, 4.0), &mut param);
        assert!(distance.approx_eq(5.0, (1e-5, 4)));
        assert_eq!(param.segment_index, 0);

        // 5 + 5 + sqrt(9 + 25 + 16)
        let length = 10.0 + 50.0f32.sqrt();
        assert!(path.length().approx_eq(length, (1e-4, 4)));

        let behind = path.calculate_target_position(&param, -1.0);
        let before_end = path.calculate_target_position(&param, length - 1.0);
        assert!(behind.abs_diff_eq(before_end, 1e-4));

        let past_end = path.calculate_target_position(&param, length + 2.5);
        assert!(past_end.abs_diff_eq(vec3(1.5, 0.0, 2.0), 1e-4));
    }
}
