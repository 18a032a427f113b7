//! The car and its per-tick update
//!
//! One [`Car::update`] call advances exactly one tick: steering and throttle
//! shaping, the front-wheel-drive speed model, gravity and friction
//! integration, lateral wall contact, and the four-wheel suspension pass.
//! The update is purely numeric and always produces a next state; degenerate
//! geometry resolves to "no contact" through the collision-side epsilon
//! guards, so a missed contact self-corrects on later ticks.

use super::input::DriveInput;
use super::tuning::CarTuning;
use super::wheel::{Wheel, WheelPlacement};
use crate::assets::{Model, ModelBounds, ModelError};
use crate::collision::{Line, LineCollision};
use crate::foundation::math::{
    resized, rotation_deg, transform_vector, translation, utils, Mat4, Vec2, Vec3,
};
use crate::world::CollisionWorld;

/// Accumulated rotation magnitude maps to applied degrees at a 10:1 ratio
const ROTATION_UNIT_DEGREES: f32 = 1.0 / 10.0;

/// Steering and throttle shaped from the held input flags
#[derive(Debug, Clone, Copy, Default)]
struct ControlState {
    /// Steering angle in whole degrees, positive to the left
    steering: i32,
    /// Commanded acceleration for the current tick
    acceleration: f32,
}

/// A four-wheeled vehicle driven over a collision world
#[derive(Debug, Clone)]
pub struct Car {
    position: Vec3,
    last_position: Vec3,
    speed: Vec3,
    rotation: Vec3,

    // The body frame expressed in world space, kept orthonormal by
    // re-normalizing after every incremental rotation.
    vector_x: Vec3,
    vector_y: Vec3,
    vector_z: Vec3,

    body_location: Vec3,
    body_position: Vec3,
    wheels: [Wheel; 4],

    control: ControlState,
    tuning: CarTuning,
}

impl Car {
    /// Load a car from a model file.
    ///
    /// The model must contain objects named `Car`, `LF`, `RF`, `LB` and
    /// `RB`; their centers become the body and wheel anchors, and the model
    /// bounds size each wheel's probe constants.
    pub fn load<P: AsRef<std::path::Path>>(path: P, tuning: CarTuning) -> Result<Self, ModelError> {
        let model = Model::load(path)?;
        Self::from_model(&model, tuning)
    }

    /// Build a car from an already-parsed model
    pub fn from_model(model: &Model, tuning: CarTuning) -> Result<Self, ModelError> {
        let bounds = model
            .bounds()
            .ok_or_else(|| ModelError::InvalidFormat("car model has no geometry".to_string()))?;
        let body = named_center(model, "Car")?;
        let mut anchors = [Vec3::zeros(); 4];
        for placement in WheelPlacement::ALL {
            anchors[placement.index()] = named_center(model, placement.object_name())?;
        }
        Ok(Self::from_layout(body, anchors, bounds, tuning))
    }

    /// Build a car directly from its anchor layout.
    ///
    /// Exposed so tests and synthetic setups can skip file loading.
    pub fn from_layout(
        body: Vec3,
        wheel_anchors: [Vec3; 4],
        bounds: ModelBounds,
        tuning: CarTuning,
    ) -> Self {
        let wheels = WheelPlacement::ALL
            .map(|placement| Wheel::new(wheel_anchors[placement.index()], bounds, placement, &tuning));
        Self {
            position: Vec3::zeros(),
            last_position: Vec3::zeros(),
            speed: Vec3::zeros(),
            rotation: Vec3::zeros(),
            vector_x: Vec3::x(),
            vector_y: Vec3::y(),
            vector_z: Vec3::z(),
            body_location: body,
            body_position: body,
            wheels,
            control: ControlState::default(),
            tuning,
        }
    }

    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position at the start of the last tick
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Place the car in the world (used once after loading)
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.last_position = position;
    }

    /// Current velocity vector
    pub fn speed(&self) -> Vec3 {
        self.speed
    }

    /// Current steering angle in whole degrees, positive to the left
    pub fn steering(&self) -> i32 {
        self.control.steering
    }

    /// The body frame axes in world space (right, up, forward)
    pub fn body_axes(&self) -> (Vec3, Vec3, Vec3) {
        (self.vector_x, self.vector_y, self.vector_z)
    }

    /// One wheel's state
    pub fn wheel(&self, placement: WheelPlacement) -> &Wheel {
        &self.wheels[placement.index()]
    }

    /// Advance the simulation by one tick.
    ///
    /// The caller invokes this once per rendered frame; the world's meshes
    /// are read-only for the duration of the call.
    pub fn update(&mut self, input: DriveInput, world: &impl CollisionWorld) {
        let left = input.contains(DriveInput::LEFT);
        let right = input.contains(DriveInput::RIGHT);
        if left && self.control.steering < self.tuning.max_steering {
            self.control.steering += self.tuning.steering_step;
        }
        if right && self.control.steering > -self.tuning.max_steering {
            self.control.steering -= self.tuning.steering_step;
        }
        // Self-centering when neither or both directions are held
        if left == right {
            if self.control.steering > 0 {
                self.control.steering -= self.tuning.centering_step;
            }
            if self.control.steering < 0 {
                self.control.steering += self.tuning.centering_step;
            }
        }

        // Back deliberately overwrites forward when both are held
        self.control.acceleration = 0.0;
        if input.contains(DriveInput::FORWARD) {
            self.control.acceleration = self.tuning.forward_acceleration;
        }
        if input.contains(DriveInput::BACK) {
            self.control.acceleration = self.tuning.reverse_acceleration;
        }

        self.check_move(
            world,
            self.control.steering as f32,
            self.control.acceleration,
            input.contains(DriveInput::BRAKE),
        );
    }

    /// Body transform for the renderer: world position plus the body anchor
    /// rotated into the current frame
    pub fn body_transform(&self) -> Mat4 {
        translation(self.position + self.body_position) * self.frame_matrix()
    }

    /// World transform of one wheel: translation to its resolved anchor,
    /// steering yaw on front wheels, then accumulated roll
    pub fn wheel_transform(&self, placement: WheelPlacement) -> Mat4 {
        let wheel = &self.wheels[placement.index()];
        let mut matrix =
            translation(self.position) * self.frame_matrix() * translation(wheel.real);
        if placement.is_front() {
            matrix *= rotation_deg(self.control.steering as f32, Vec3::y());
        }
        matrix * rotation_deg(wheel.roll_angle, Vec3::x())
    }

    fn frame_matrix(&self) -> Mat4 {
        let x = resized(self.vector_x, 1.0);
        let y = resized(self.vector_y, 1.0);
        let z = resized(self.vector_z, 1.0);
        Mat4::new(
            x.x, y.x, z.x, 0.0, //
            x.y, y.y, z.y, 0.0, //
            x.z, y.z, z.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn check_move(&mut self, world: &impl CollisionWorld, turn: f32, acceleration: f32, brake: bool) {
        self.last_position = self.position;

        let direct_speed = acceleration * self.tuning.direct_drive_scale;
        let front_touched = self.wheels[WheelPlacement::FrontLeft.index()].is_touched
            && self.wheels[WheelPlacement::FrontRight.index()].is_touched;
        if front_touched {
            let mut front_wheel_speed = if brake {
                self.speed *= self.tuning.wheel_friction;
                0.0
            } else {
                // Project the velocity onto the steering-rotated forward axis
                let steer_matrix = rotation_deg(turn, self.vector_y);
                let steered_forward = transform_vector(&steer_matrix, self.vector_z);
                self.speed.dot(&steered_forward)
            };
            // Throttle alone can spin the wheels visually at low speed
            if direct_speed.abs() > front_wheel_speed.abs() {
                front_wheel_speed = direct_speed;
            }

            self.speed += resized(self.vector_z, acceleration);
            for placement in [WheelPlacement::FrontLeft, WheelPlacement::FrontRight] {
                let wheel = &mut self.wheels[placement.index()];
                wheel.roll_angle += front_wheel_speed * wheel.turn_koef;
            }
        } else {
            // Airborne free spin driven by throttle only
            for placement in [WheelPlacement::FrontLeft, WheelPlacement::FrontRight] {
                let wheel = &mut self.wheels[placement.index()];
                if !wheel.is_touched && !brake {
                    wheel.roll_angle += direct_speed * wheel.turn_koef;
                }
            }
        }

        let back_wheel_speed = self.speed.dot(&self.vector_z);
        if !brake {
            for placement in [WheelPlacement::BackLeft, WheelPlacement::BackRight] {
                let wheel = &mut self.wheels[placement.index()];
                if wheel.is_touched {
                    wheel.roll_angle += back_wheel_speed * wheel.turn_koef;
                }
            }
        }

        // Blended steering torque: a speed-damped term and a
        // throttle-proportional term, averaged
        let speed2 =
            back_wheel_speed + self.speed.dot(&self.vector_x) * utils::deg_to_rad(turn).sin();
        let speed_turn = if brake {
            0.0
        } else {
            turn * speed2 / (20.0 + 2.0 * speed2 * speed2)
        };
        let do_turn = (speed_turn + turn * acceleration) / 2.0;

        let any_front_touched = self.wheels[WheelPlacement::FrontLeft.index()].is_touched
            || self.wheels[WheelPlacement::FrontRight.index()].is_touched;
        if any_front_touched && do_turn.abs() > self.tuning.turn_torque_epsilon {
            self.rotation += resized(self.vector_y, do_turn);
            self.rotate(do_turn, self.vector_y);
        }

        self.check_collision(world);
    }

    fn check_collision(&mut self, world: &impl CollisionWorld) {
        // Gravity, rolling friction, free integration before contact
        self.speed += Vec3::new(0.0, -self.tuning.gravity, 0.0);
        self.speed -= self.speed * (1.0 - self.tuning.speed_friction);
        self.position += self.speed;

        self.check_walls(world);

        // Apply the rotation accumulated so far, then damp it
        let angle = self.rotation.magnitude() * ROTATION_UNIT_DEGREES;
        if angle > self.tuning.rotation_epsilon {
            let axis = resized(self.rotation, 1.0);
            self.rotate(angle, axis);
        }
        // Damped twice per tick: scaled down, then the complement of the
        // already-scaled value subtracted again
        self.rotation *= self.tuning.rotation_friction;
        self.rotation -= self.rotation * (1.0 - self.tuning.rotation_friction);

        // Suspension pass; the weight-transfer torque collects into a local
        // accumulator so the per-phase reset order stays explicit
        let mut rot_force = Vec3::zeros();
        for index in 0..self.wheels.len() {
            self.check_wheel(index, world, &mut rot_force);
        }
        let angle = rot_force.magnitude() * ROTATION_UNIT_DEGREES;
        if angle > self.tuning.rotation_epsilon {
            let axis = resized(rot_force, 1.0);
            self.rotate(angle, axis);
        }
    }

    /// Lateral wall contact, with outward probe directions unique to each
    /// corner
    fn check_walls(&mut self, world: &impl CollisionWorld) {
        let x = self.vector_x;
        let z = self.vector_z;
        self.check_wheel_collision(world, WheelPlacement::FrontLeft.index(), -x, -z);
        self.check_wheel_collision(world, WheelPlacement::FrontRight.index(), x, -z);
        self.check_wheel_collision(world, WheelPlacement::BackLeft.index(), -x, z);
        self.check_wheel_collision(world, WheelPlacement::BackRight.index(), x, z);
    }

    fn check_wheel_collision(
        &mut self,
        world: &impl CollisionWorld,
        index: usize,
        dir_x: Vec3,
        dir_z: Vec3,
    ) {
        let wheel = self.wheels[index];
        let anchor = wheel.position + self.position;

        let p2 = anchor - resized(dir_x, wheel.check_x);
        let p1 = anchor + resized(dir_x, self.tuning.wall_probe_length);
        if let Some(hit) = world.nearest_wall_collision(&Line::new(p1, p2)) {
            self.deflect_from_wall(&hit);
        }

        let anchor = self.wheels[index].position + self.position;
        let p2 = anchor + resized(dir_z, wheel.check_z.abs());
        let p1 = anchor - resized(dir_z, self.tuning.wall_probe_length);
        if let Some(hit) = world.nearest_wall_collision(&Line::new(p1, p2)) {
            self.deflect_from_wall(&hit);
        }
    }

    /// Push out along the contact normal by the penetration estimate and
    /// keep only a damped tangential velocity (lossy sliding bounce)
    fn deflect_from_wall(&mut self, hit: &LineCollision) {
        self.position += resized(hit.normal(), hit.bottom_height().abs());
        let cross = self.speed.cross(&hit.normal());
        let tangent = resized(hit.normal().cross(&cross), 1.0);
        let along = tangent.dot(&self.speed);
        self.speed = tangent * along * self.tuning.wall_restitution;
    }

    /// Suspension probe for one wheel: touch state, render offset, contact
    /// response, and the weight-transfer torque contribution
    fn check_wheel(&mut self, index: usize, world: &impl CollisionWorld, rot_force: &mut Vec3) {
        let mut wheel = self.wheels[index];
        wheel.is_touched = false;

        let anchor = wheel.position + self.position;
        let p1 = anchor + resized(self.vector_y, self.tuning.ground_ray_reach);
        let p2 = anchor - resized(self.vector_y, wheel.check_y + self.tuning.suspension_length);

        let Some(hit) = world.nearest_ground_collision(&Line::new(p1, p2)) else {
            wheel.real = wheel.location - Vec3::new(0.0, self.tuning.suspension_length, 0.0);
            self.wheels[index] = wheel;
            return;
        };

        let distance = (hit.intersection() - p1).magnitude();
        let rest = self.tuning.ground_ray_reach + wheel.check_y;
        if distance > rest {
            // Contact beyond the natural extended length: the wheel drops by
            // the extra travel
            wheel.real = wheel.location - Vec3::new(0.0, distance - rest, 0.0);
        } else {
            wheel.real = wheel.location;
        }
        wheel.is_touched = true;

        if distance < rest {
            // Fully stiff within travel: kill the velocity into the ground
            // and push the body up by the compression amount
            let into_ground = hit.normal().dot(&self.speed);
            self.speed -= resized(hit.normal(), into_ground);
            self.position += resized(self.vector_y, rest - distance);
        }

        let lever = resized(hit.normal().cross(&(-wheel.position)), 1.0);
        let koef = lateral_factor(hit.intersection(), self.tuning.rotation_epsilon);
        if koef.x.abs() > self.tuning.rotation_epsilon {
            let compression = 1.0 - (distance - rest) / self.tuning.suspension_length;
            let torque = resized(
                lever,
                koef.x * koef.x * compression * self.tuning.lateral_torque_scale,
            );
            *rot_force += torque;
            self.rotation += torque;
        }

        self.wheels[index] = wheel;
    }

    /// Rotate the body frame and every frame-attached anchor by the given
    /// angle (degrees) about an axis
    fn rotate(&mut self, angle_deg: f32, axis: Vec3) {
        let matrix = rotation_deg(angle_deg, axis);
        self.vector_x = resized(transform_vector(&matrix, self.vector_x), 1.0);
        self.vector_y = resized(transform_vector(&matrix, self.vector_y), 1.0);
        self.vector_z = resized(transform_vector(&matrix, self.vector_z), 1.0);

        self.body_position = transform_vector(&matrix, self.body_position);
        for wheel in &mut self.wheels {
            wheel.position = transform_vector(&matrix, wheel.position);
        }
    }
}

/// The unit 2D factor scaling the weight-transfer torque, derived from the
/// contact point.
///
/// The radicand goes negative for contact points a unit or more from the
/// origin; it is clamped to zero, which zeroes the factor's X component and
/// with it the torque contribution.
fn lateral_factor(intersection: Vec3, epsilon: f32) -> Vec2 {
    let y = (-intersection).dot(&intersection);
    let length = intersection.magnitude();
    let x = (length * length - y * y).max(0.0).sqrt();
    let koef = Vec2::new(x, y);
    if koef.magnitude() > epsilon {
        koef.normalize()
    } else {
        Vec2::new(1.0, 0.0)
    }
}

fn named_center(model: &Model, name: &str) -> Result<Vec3, ModelError> {
    model
        .find_object(name)
        .map(|object| object.center())
        .ok_or_else(|| ModelError::MissingObject(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Mesh, Triangle};
    use approx::assert_relative_eq;

    /// Synthetic world: one huge ground quad and optionally one wall quad
    struct FlatWorld {
        ground: Option<Mesh>,
        wall: Option<Mesh>,
    }

    impl FlatWorld {
        fn ground_at(height: f32) -> Self {
            Self {
                ground: Some(quad_y(height)),
                wall: None,
            }
        }

        fn empty() -> Self {
            Self {
                ground: None,
                wall: None,
            }
        }
    }

    impl CollisionWorld for FlatWorld {
        fn nearest_ground_collision(&self, line: &Line) -> Option<LineCollision> {
            self.ground.as_ref().and_then(|mesh| mesh.line_collision(line))
        }

        fn nearest_wall_collision(&self, line: &Line) -> Option<LineCollision> {
            self.wall.as_ref().and_then(|mesh| mesh.line_collision(line))
        }
    }

    /// Horizontal quad with +Y normal
    fn quad_y(height: f32) -> Mesh {
        let s = 5000.0;
        let a = Vec3::new(-s, height, -s);
        let b = Vec3::new(s, height, -s);
        let c = Vec3::new(s, height, s);
        let d = Vec3::new(-s, height, s);
        Mesh::new(vec![Triangle::new(a, d, c), Triangle::new(a, c, b)])
    }

    /// Vertical quad at the given z with -Z normal (faces the -Z side),
    /// spanning only the positive-x half so a probe on the left side of the
    /// car can hit while its right-side twin passes by
    fn quad_z(depth: f32) -> Mesh {
        let s = 50.0;
        let a = Vec3::new(0.5, -s, depth);
        let b = Vec3::new(s, -s, depth);
        let c = Vec3::new(s, s, depth);
        let d = Vec3::new(0.5, s, depth);
        Mesh::new(vec![Triangle::new(a, c, b), Triangle::new(a, d, c)])
    }

    /// Wheels one unit above the model bottom at (+-2, -1, +-3); at body
    /// height y = 2 all four wheels rest exactly on ground at y = 0.
    fn test_car() -> Car {
        let bounds = ModelBounds {
            min: Vec3::new(-3.0, -2.0, -4.0),
            max: Vec3::new(3.0, 2.0, 4.0),
        };
        Car::from_layout(
            Vec3::zeros(),
            [
                Vec3::new(2.0, -1.0, -3.0),
                Vec3::new(-2.0, -1.0, -3.0),
                Vec3::new(2.0, -1.0, 3.0),
                Vec3::new(-2.0, -1.0, 3.0),
            ],
            bounds,
            CarTuning::default(),
        )
    }

    fn settle(car: &mut Car, world: &FlatWorld, ticks: usize) {
        for _ in 0..ticks {
            car.update(DriveInput::empty(), world);
        }
    }

    #[test]
    fn test_steering_clamps_and_decays() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));

        for _ in 0..20 {
            car.update(DriveInput::LEFT, &world);
        }
        assert_eq!(car.steering(), 30);

        let mut previous = car.steering();
        for _ in 0..40 {
            car.update(DriveInput::empty(), &world);
            assert!(car.steering() <= previous);
            assert!(car.steering() >= 0);
            previous = car.steering();
        }
        assert_eq!(car.steering(), 0);
    }

    #[test]
    fn test_opposed_steering_inputs_center() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));

        for _ in 0..5 {
            car.update(DriveInput::RIGHT, &world);
        }
        assert_eq!(car.steering(), -10);
        // Holding both decays by one while the +-2 steps cancel
        car.update(DriveInput::LEFT | DriveInput::RIGHT, &world);
        assert_eq!(car.steering(), -9);
    }

    #[test]
    fn test_steady_state_on_flat_ground() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        // Away from the origin the lateral torque factor degenerates to
        // zero, so a settled car must stay exactly put.
        let rest = Vec3::new(50.0, 2.0, 50.0);
        car.set_position(rest);

        car.update(DriveInput::empty(), &world);
        assert_relative_eq!(car.position(), rest, epsilon = 1e-3);
        assert_relative_eq!(car.speed(), Vec3::zeros(), epsilon = 1e-4);

        for placement in WheelPlacement::ALL {
            assert!(car.wheel(placement).is_touched());
            assert_relative_eq!(
                car.wheel(placement).real(),
                car.wheel(placement).location(),
                epsilon = 1e-4
            );
        }

        // And it stays put over many ticks
        settle(&mut car, &world, 50);
        assert_relative_eq!(car.position(), rest, epsilon = 1e-2);
        let (x, y, z) = car.body_axes();
        assert_relative_eq!(x, Vec3::x(), epsilon = 1e-4);
        assert_relative_eq!(y, Vec3::y(), epsilon = 1e-4);
        assert_relative_eq!(z, Vec3::z(), epsilon = 1e-4);
    }

    #[test]
    fn test_airborne_wheel_rests_at_full_travel() {
        let world = FlatWorld::empty();
        let mut car = test_car();
        car.set_position(Vec3::new(0.0, 100.0, 0.0));

        car.update(DriveInput::empty(), &world);

        let suspension = CarTuning::default().suspension_length;
        for placement in WheelPlacement::ALL {
            let wheel = car.wheel(placement);
            assert!(!wheel.is_touched());
            assert_relative_eq!(
                wheel.real(),
                wheel.location() - Vec3::new(0.0, suspension, 0.0),
                epsilon = 1e-5
            );
        }
        // Free fall accelerates downward
        assert!(car.speed().y < 0.0);
        assert!(car.position().y < 100.0);
    }

    #[test]
    fn test_forward_throttle_accelerates_along_forward_axis() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));
        settle(&mut car, &world, 2);

        car.update(DriveInput::FORWARD, &world);
        let forward_speed = car.speed().dot(&Vec3::z());
        assert_relative_eq!(forward_speed, 0.15 * 0.99, epsilon = 1e-4);
        assert!(car.position().z > 50.0);
    }

    #[test]
    fn test_back_overrides_forward_when_both_held() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));
        settle(&mut car, &world, 2);

        car.update(DriveInput::FORWARD | DriveInput::BACK, &world);
        let forward_speed = car.speed().dot(&Vec3::z());
        assert_relative_eq!(forward_speed, -0.1 * 0.99, epsilon = 1e-4);
    }

    #[test]
    fn test_driven_wheels_roll_faster_than_rears_at_launch() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));
        settle(&mut car, &world, 2);

        car.update(DriveInput::FORWARD, &world);
        let front = car.wheel(WheelPlacement::FrontLeft).roll_angle();
        let back = car.wheel(WheelPlacement::BackLeft).roll_angle();
        // The throttle floor spins the fronts at |accel| * 20 while the
        // rears follow the still-small actual speed.
        assert!(front > back);
        assert!(back > 0.0);
    }

    #[test]
    fn test_airborne_fronts_free_spin_on_throttle() {
        let world = FlatWorld::empty();
        let mut car = test_car();
        car.set_position(Vec3::new(0.0, 100.0, 0.0));

        car.update(DriveInput::FORWARD, &world);
        assert!(car.wheel(WheelPlacement::FrontLeft).roll_angle() > 0.0);
        assert!(car.wheel(WheelPlacement::FrontRight).roll_angle() > 0.0);
        // Rears only roll with ground contact
        assert_relative_eq!(car.wheel(WheelPlacement::BackLeft).roll_angle(), 0.0);
    }

    #[test]
    fn test_brake_damps_speed_and_stops_roll() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));
        settle(&mut car, &world, 2);
        for _ in 0..10 {
            car.update(DriveInput::FORWARD, &world);
        }

        let speed_before = car.speed().magnitude();
        let roll_before = car.wheel(WheelPlacement::BackLeft).roll_angle();
        car.update(DriveInput::BRAKE, &world);
        assert!(car.speed().magnitude() < speed_before);
        assert_relative_eq!(car.wheel(WheelPlacement::BackLeft).roll_angle(), roll_before);
    }

    #[test]
    fn test_steering_under_throttle_turns_the_body() {
        let world = FlatWorld::ground_at(0.0);
        let mut car = test_car();
        car.set_position(Vec3::new(50.0, 2.0, 50.0));
        settle(&mut car, &world, 2);

        for _ in 0..10 {
            car.update(DriveInput::FORWARD | DriveInput::LEFT, &world);
        }
        let (_, y, z) = car.body_axes();
        // Left turn rotates the forward axis toward +X about the up axis
        assert!(z.x > 0.01);
        assert_relative_eq!(y, Vec3::y(), epsilon = 1e-2);
    }

    #[test]
    fn test_wall_contact_pushes_out_and_damps_speed() {
        let mut world = FlatWorld::empty();
        world.wall = Some(quad_z(6.0));
        let mut car = test_car();

        // Aim at the wall with some lateral speed so the tangential
        // projection is well defined.
        car.speed = Vec3::new(0.5, 0.0, 1.0);
        car.update(DriveInput::empty(), &world);

        // Gravity and rolling friction shape the pre-contact velocity; the
        // back-left probe then removes the normal component and keeps 90%
        // of the rest, after pushing the body back out along the normal.
        let expected = Vec3::new(0.495, -0.1485, 0.0) * 0.9;
        assert_relative_eq!(car.speed(), expected, epsilon = 1e-3);
        assert_relative_eq!(
            car.position(),
            Vec3::new(0.495, -0.1485, -2.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_lateral_factor_clamps_negative_radicand() {
        // Contact a unit or more out degenerates to a pure-Y factor
        let far = lateral_factor(Vec3::new(30.0, 0.0, 40.0), 1e-7);
        assert_relative_eq!(far.x, 0.0);
        // Very close to the origin the fallback keeps a unit X
        let near = lateral_factor(Vec3::new(1e-5, 0.0, 0.0), 1e-7);
        assert_relative_eq!(near.x, 1.0);
    }

    #[test]
    fn test_body_and_wheel_transforms_anchor_points() {
        let mut car = test_car();
        car.set_position(Vec3::new(10.0, 5.0, -2.0));

        let body_origin = transform_vector(&car.body_transform(), Vec3::zeros());
        assert_relative_eq!(body_origin, Vec3::new(10.0, 5.0, -2.0), epsilon = 1e-5);

        let wheel = car.wheel(WheelPlacement::BackRight);
        let wheel_origin =
            transform_vector(&car.wheel_transform(WheelPlacement::BackRight), Vec3::zeros());
        assert_relative_eq!(
            wheel_origin,
            Vec3::new(10.0, 5.0, -2.0) + wheel.real(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_from_model_derives_wheel_constants() {
        let obj = "\
o Car
v -3.0 -2.0 -4.0
v 3.0 2.0 4.0
v 0.0 0.0 0.0
f 1 2 3
o LF
v 1.0 -1.0 -3.0
v 3.0 -1.0 -3.0
v 2.0 -1.0 -3.0
f 4 5 6
o RF
v -1.0 -1.0 -3.0
v -3.0 -1.0 -3.0
v -2.0 -1.0 -3.0
f 7 8 9
o LB
v 1.0 -1.0 3.0
v 3.0 -1.0 3.0
v 2.0 -1.0 3.0
f 10 11 12
o RB
v -1.0 -1.0 3.0
v -3.0 -1.0 3.0
v -2.0 -1.0 3.0
f 13 14 15
";
        let model = Model::from_reader(std::io::Cursor::new(obj)).expect("valid car obj");
        let car = Car::from_model(&model, CarTuning::default()).expect("all objects present");

        let front_left = car.wheel(WheelPlacement::FrontLeft);
        assert_relative_eq!(front_left.location(), Vec3::new(2.0, -1.0, -3.0), epsilon = 1e-5);
        assert_relative_eq!(front_left.check_x(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(front_left.check_y(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(front_left.check_z(), 5.0, epsilon = 1e-5);

        let back_right = car.wheel(WheelPlacement::BackRight);
        assert_relative_eq!(back_right.check_x(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(back_right.check_z(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_wheel_object_is_a_load_error() {
        let obj = "o Car\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let model = Model::from_reader(std::io::Cursor::new(obj)).expect("valid obj");
        let result = Car::from_model(&model, CarTuning::default());
        assert!(matches!(result, Err(ModelError::MissingObject(_))));
    }
}
